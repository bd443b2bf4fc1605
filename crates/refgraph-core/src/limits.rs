//! Input validation limits for traversal and scanning

/// Length of an asset identifier token (32 chars)
pub const ASSET_ID_LEN: usize = 32;

/// Maximum traversal depth (50)
pub const MAX_TRAVERSAL_DEPTH: u32 = 50;

/// Default traversal depth used by front-ends (10)
pub const DEFAULT_TRAVERSAL_DEPTH: u32 = 10;

/// Maximum marker length (64 chars)
pub const MAX_MARKER_LEN: usize = 64;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TraversalDepthTooLarge { depth: u32, max: u32 },
    MarkerTooLong { len: usize, max: usize },
    EmptyMarker,
    EmptySuffix,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
            Self::MarkerTooLong { len, max } => {
                write!(f, "Marker too long: {} chars (max {})", len, max)
            }
            Self::EmptyMarker => write!(f, "Marker cannot be empty"),
            Self::EmptySuffix => write!(f, "Metadata suffix cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}

/// Validate the reference marker
pub fn validate_marker(marker: &str) -> Result<(), ValidationError> {
    if marker.is_empty() {
        return Err(ValidationError::EmptyMarker);
    }
    if marker.len() > MAX_MARKER_LEN {
        return Err(ValidationError::MarkerTooLong {
            len: marker.len(),
            max: MAX_MARKER_LEN,
        });
    }
    Ok(())
}

/// Validate the sidecar metadata suffix
pub fn validate_meta_suffix(suffix: &str) -> Result<(), ValidationError> {
    if suffix.is_empty() {
        return Err(ValidationError::EmptySuffix);
    }
    Ok(())
}
