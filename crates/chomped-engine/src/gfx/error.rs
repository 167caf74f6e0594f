use std::fmt;

use crate::shader::StageKind;

/// Shader build failure reported by the graphics context.
///
/// Both variants are diagnostic: a shape that hits one still exists but
/// draws nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The compiler rejected a stage's source text.
    Compile { stage: StageKind, log: String },
    /// Both stages compiled but could not be linked into a program.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { stage, log } => write!(f, "{stage} shader failed to compile: {log}"),
            Self::Link { log } => write!(f, "shader program failed to link: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}
