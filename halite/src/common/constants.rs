// doc constants
pub const DOC_ID: &str = "_id";

// store constants
pub const DOC_FILE_EXT: &str = "json";
