use primitive_types::U256;

/// Number of past blocks averaged by the weighted-average retarget.
pub const DGW_PAST_BLOCKS: u64 = 24;

/// A block arriving this many seconds after its predecessor may use the
/// minimum difficulty on permissive networks (2 hours).
pub const MIN_DIFFICULTY_STALL_SECONDS: i64 = 2 * 60 * 60;

/// Multiplier applied to the previous target when a block on a permissive
/// network is late by more than four spacings.
pub const LATE_BLOCK_TARGET_MULTIPLIER: u64 = 10;

/// Cumulative work of the abandoned testnet chain. Once the local chain has
/// at least this much work the permissive retarget rules apply on testnet.
pub const TESTNET_MIN_DIFFICULTY_WORK: U256 = U256([0x003e_9ccf_e0e0_3e01, 0, 0, 0]);

/// Cumulative work after which testnet switches from the abrupt
/// min-difficulty rule to the smoother stall rules.
pub const TESTNET_SMOOTH_RETARGET_WORK: U256 = U256([0x003f_f000_0000_0000, 0, 0, 0]);

/// Target block time in seconds on every built-in network.
pub const TARGET_BLOCK_SPACING: i64 = 150;

/// Legacy retarget window in seconds (one day).
pub const TARGET_TIMESPAN: i64 = 24 * 60 * 60;
