/// Column names as constants for type safety
/// Data product type (image, cube, ...)
pub const DATAPRODUCT_TYPE: &str = "dataproduct_type";
/// Data product subtype
pub const DATAPRODUCT_SUBTYPE: &str = "dataproduct_subtype";
/// Name of the facility used for the observation
pub const FACILITY_NAME: &str = "facility_name";
/// Calibration level (0 raw .. 4 analysis product)
pub const CALIB_LEVEL: &str = "calib_level";
/// Astronomical object observed
pub const TARGET_NAME: &str = "target_name";
/// Internal observation identifier
pub const OBS_ID: &str = "obs_id";
/// Name of the data collection
pub const OBS_COLLECTION: &str = "obs_collection";
/// Dataset identifier given by the publisher
pub const OBS_PUBLISHER_DID: &str = "obs_publisher_did";
/// URL used to access the dataset
pub const ACCESS_URL: &str = "access_url";
/// File content format (MIME type)
pub const ACCESS_FORMAT: &str = "access_format";

// Spatial axis
/// Central right ascension in degrees
pub const S_RA: &str = "s_ra";
/// Central declination in degrees
pub const S_DEC: &str = "s_dec";
/// Diameter of the covered region in degrees
pub const S_FOV: &str = "s_fov";
/// Sky region covered by the data product
pub const S_REGION: &str = "s_region";
/// Spatial resolution of data as FWHM
pub const S_RESOLUTION: &str = "s_resolution";
/// Number of elements along the first spatial axis
pub const S_XEL1: &str = "s_xel1";
/// Number of elements along the second spatial axis
pub const S_XEL2: &str = "s_xel2";

// Time axis
/// Number of elements along the time axis
pub const T_XEL: &str = "t_xel";
/// Start time in MJD
pub const T_MIN: &str = "t_min";
/// Stop time in MJD
pub const T_MAX: &str = "t_max";
/// Total exposure time in seconds
pub const T_EXPTIME: &str = "t_exptime";
/// Temporal resolution FWHM
pub const T_RESOLUTION: &str = "t_resolution";

// Spectral axis
/// Number of elements along the spectral axis
pub const EM_XEL: &str = "em_xel";
/// Start in spectral coordinates (meters)
pub const EM_MIN: &str = "em_min";
/// Stop in spectral coordinates (meters)
pub const EM_MAX: &str = "em_max";
/// Spectral resolving power
pub const EM_RES_POWER: &str = "em_res_power";
/// Band or filter name (non-standard column)
pub const EM_FILTER_NAME: &str = "em_filter_name";

/// UCD of the observable
pub const O_UCD: &str = "o_ucd";
/// Number of polarization samples
pub const POL_XEL: &str = "pol_xel";
/// Name of the instrument used for the observation
pub const INSTRUMENT_NAME: &str = "instrument_name";
