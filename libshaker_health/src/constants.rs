// Column names as they appear in the rig data export header
pub const DATE_COLUMN: &str = "YYYY/MM/DD";
pub const TIME_COLUMN: &str = "HH:MM:SS";
pub const HOLE_DEPTH_COLUMN: &str = "Hole Depth (feet)";
pub const BIT_DEPTH_COLUMN: &str = "Bit Depth (feet)";
pub const HOOK_LOAD_COLUMN: &str = "Hook Load (klbs)";
pub const TOTAL_MUD_VOLUME_COLUMN: &str = "Total Mud Volume (barrels)";
pub const WEIGHT_ON_BIT_COLUMN: &str = "Weight on Bit (klbs)";
pub const SHAKER_1_COLUMN: &str = "SHAKER #1 (Units)";
pub const TOOL_FACE_COLUMN: &str = "Tool Face (degrees)";
pub const SHAKER_2_COLUMN: &str = "SHAKER #2 (Units)";
pub const SHAKER_3_COLUMN: &str = "SHAKER #3 (PERCENT)";
pub const HEAVY_RATIO_COLUMN: &str = "Heavy Ratio (percent)";
pub const PVT_GAIN_LOSS_COLUMN: &str = "PVT Monitor Mud Gain/Loss (barrels)";
pub const TOTAL_MUD_LOW_WARNING_COLUMN: &str = "Total Mud Low Warning (barrels)";
pub const FLOW_LOW_WARNING_COLUMN: &str = "Flow Low Warning (flow_percent)";
pub const FLOW_HIGH_WARNING_COLUMN: &str = "Flow High Warning (flow_percent)";
pub const TRIP_MUD_HIGH_WARNING_COLUMN: &str = "Trip Mud High Warning (barrels)";
pub const TEMPERATURE_COLUMN: &str = "MA_Temp (degF)";
pub const FLOW_RATE_COLUMN: &str = "MA_Flow_Rate (gal/min)";
pub const SITE_MUD_VOLUME_COLUMN: &str = "Site Mud Volume (barrels)";
pub const INACTIVE_MUD_VOLUME_COLUMN: &str = "Inactive Mud Volume (barrels)";

/// Every column a shaker log must carry, in export order
pub const REQUIRED_COLUMNS: [&str; 21] = [
    DATE_COLUMN,
    TIME_COLUMN,
    HOLE_DEPTH_COLUMN,
    BIT_DEPTH_COLUMN,
    HOOK_LOAD_COLUMN,
    TOTAL_MUD_VOLUME_COLUMN,
    WEIGHT_ON_BIT_COLUMN,
    SHAKER_1_COLUMN,
    TOOL_FACE_COLUMN,
    SHAKER_2_COLUMN,
    SHAKER_3_COLUMN,
    HEAVY_RATIO_COLUMN,
    PVT_GAIN_LOSS_COLUMN,
    TOTAL_MUD_LOW_WARNING_COLUMN,
    FLOW_LOW_WARNING_COLUMN,
    FLOW_HIGH_WARNING_COLUMN,
    TRIP_MUD_HIGH_WARNING_COLUMN,
    TEMPERATURE_COLUMN,
    FLOW_RATE_COLUMN,
    SITE_MUD_VOLUME_COLUMN,
    INACTIVE_MUD_VOLUME_COLUMN,
];

// Metric defaults
pub const DEFAULT_EXPECTED_SCREEN_LIFE_HOURS: f64 = 120.0;
pub const DEFAULT_UTILIZATION_THRESHOLD_PERCENT: f64 = 80.0;
pub const MIN_UTILIZATION_THRESHOLD_PERCENT: f64 = 50.0;
pub const MAX_UTILIZATION_THRESHOLD_PERCENT: f64 = 100.0;

// Heuristic proxy scalings
pub const SOLIDS_RATE_DIVISOR: f64 = 100.0;
pub const ROP_USAGE_DIVISOR: f64 = 1000.0;
pub const USAGE_HOURS_PER_FACTOR: f64 = 10.0;

// Drop detection; shaker #3 in percentage points, flow in gal/min
pub const DROP_SHAKER_DELTA: f64 = 10.0;
pub const DROP_FLOW_DELTA: f64 = 2.0;

/// Box plot whisker reach in units of the interquartile range
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// This is the version of the report format
pub const REPORT_FORMAT_VERSION: &str = "1.0";
