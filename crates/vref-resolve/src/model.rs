//! Content model names given to virtual content.

/// Marks every virtual folder and vanilla view.
pub const VIRTUAL_ASPECT: &str = "vm:virtual";

/// Marks real nodes reached through a virtual folder.
pub const VIRTUAL_DOCUMENT_ASPECT: &str = "vm:virtualDocument";

/// Virtual folders carry a title.
pub const TITLED_ASPECT: &str = "cm:titled";

/// The type every virtual folder reports.
pub const VIRTUAL_FOLDER_TYPE: &str = "cm:folder";
