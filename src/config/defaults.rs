//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [excerpt] Section Defaults
// ============================================================================

pub mod excerpt {
    pub fn length() -> usize {
        55
    }

    pub fn more() -> String {
        "…".into()
    }
}

// ============================================================================
// [image] Section Defaults
// ============================================================================

pub mod image {
    pub fn size() -> String {
        "medium".into()
    }
}
