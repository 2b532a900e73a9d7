use std::fmt;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Fatal device-level failures, reported once at initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// No adapter, device or surface could be obtained.
    Unavailable(String),
    /// A replacement sprite shader could not be linked into the pipeline.
    ShaderLink(ShaderLinkError),
}

/// Why a sprite shader failed to link.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderLinkError {
    /// Entry points the pipeline links against are not declared.
    MissingEntryPoints(Vec<&'static str>),
    /// wgpu rejected the shader module or the pipeline built from it.
    Validation(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Unavailable(msg) => write!(f, "graphics device unavailable: {msg}"),
            DeviceError::ShaderLink(e) => write!(f, "shader link failed: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::ShaderLink(e) => Some(e),
            DeviceError::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for ShaderLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderLinkError::MissingEntryPoints(missing) => {
                write!(f, "missing entry point(s) {}", missing.join(", "))
            }
            ShaderLinkError::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ShaderLinkError {}

impl From<ShaderLinkError> for DeviceError {
    fn from(e: ShaderLinkError) -> Self {
        DeviceError::ShaderLink(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_link_display_names_missing_entries() {
        let e = DeviceError::from(ShaderLinkError::MissingEntryPoints(vec!["vs_main", "fs_main"]));
        assert_eq!(e.to_string(), "shader link failed: missing entry point(s) vs_main, fs_main");
    }

    #[test]
    fn shader_link_display_carries_validation_message() {
        let e = DeviceError::from(ShaderLinkError::Validation("bad return type".into()));
        assert_eq!(e.to_string(), "shader link failed: bad return type");
        assert!(std::error::Error::source(&e).is_some());
    }
}
