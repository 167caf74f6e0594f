//! In-memory `GraphicsContext` that records every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::Transform;
use crate::geometry::{DrawCall, Geometry};
use crate::shader::StageKind;

use super::{GraphicsContext, ShaderError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CompileStage(StageKind, u32),
    ReleaseStage(u32),
    LinkProgram(u32),
    ReleaseProgram(u32),
    UploadGeometry(u32),
    ReleaseBuffers(u32),
    UseProgram(u32),
    BindGeometry(u32),
    SetColor([f32; 4]),
    SetTransform([f32; 16]),
    Draw(DrawCall),
    UnbindGeometry(u32),
}

type Log = Rc<RefCell<Vec<Call>>>;

/// Handle that records its own release.
#[derive(Debug)]
pub(crate) struct Handle {
    pub id: u32,
    release: Call,
    log: Log,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.log.borrow_mut().push(self.release.clone());
    }
}

/// Accepts a stage if it exports the stage's entry point and its brackets
/// balance. Linking fails only when `fail_link` is set.
#[derive(Default)]
pub(crate) struct RecordingContext {
    log: Log,
    next_id: u32,
    pub fail_link: bool,
    pub pending_error: Option<String>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    fn handle(&mut self, make: impl FnOnce(u32) -> Call, release: fn(u32) -> Call) -> Handle {
        self.next_id += 1;
        let id = self.next_id;
        self.log.borrow_mut().push(make(id));
        Handle {
            id,
            release: release(id),
            log: Rc::clone(&self.log),
        }
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

fn brackets_balance(source: &str) -> bool {
    let mut stack = Vec::new();
    for ch in source.chars() {
        match ch {
            '{' | '(' | '[' => stack.push(ch),
            '}' => {
                if stack.pop() != Some('{') {
                    return false;
                }
            }
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

impl GraphicsContext for RecordingContext {
    type Stage = (StageKind, Handle);
    type Program = Handle;
    type Buffers = Handle;

    fn compile_stage(&mut self, kind: StageKind, source: &str) -> Result<Self::Stage, ShaderError> {
        let entry = format!("fn {}", kind.entry_point());
        if !source.contains(&entry) {
            return Err(ShaderError::Compile {
                stage: kind,
                log: format!("missing entry point `{}`", kind.entry_point()),
            });
        }
        if !brackets_balance(source) {
            return Err(ShaderError::Compile {
                stage: kind,
                log: "unbalanced brackets".to_string(),
            });
        }
        let handle = self.handle(|id| Call::CompileStage(kind, id), Call::ReleaseStage);
        Ok((kind, handle))
    }

    fn link_program(
        &mut self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, ShaderError> {
        if vertex.0 != StageKind::Vertex || fragment.0 != StageKind::Fragment {
            return Err(ShaderError::Link { log: "stage kinds swapped".to_string() });
        }
        if self.fail_link {
            return Err(ShaderError::Link { log: "interface mismatch".to_string() });
        }
        Ok(self.handle(Call::LinkProgram, Call::ReleaseProgram))
    }

    fn upload_geometry(&mut self, _geometry: &Geometry) -> Self::Buffers {
        self.handle(Call::UploadGeometry, Call::ReleaseBuffers)
    }

    fn use_program(&mut self, program: &Self::Program) {
        self.push(Call::UseProgram(program.id));
    }

    fn bind_geometry(&mut self, buffers: &Self::Buffers) {
        self.push(Call::BindGeometry(buffers.id));
    }

    fn set_color(&mut self, _program: &Self::Program, rgba: [f32; 4]) {
        self.push(Call::SetColor(rgba));
    }

    fn set_transform(&mut self, _program: &Self::Program, mvp: &Transform) {
        self.push(Call::SetTransform(mvp.to_cols_array()));
    }

    fn draw(&mut self, call: DrawCall) {
        self.push(Call::Draw(call));
    }

    fn unbind_geometry(&mut self, buffers: &Self::Buffers) {
        self.push(Call::UnbindGeometry(buffers.id));
    }

    fn take_error(&mut self) -> Option<String> {
        self.pending_error.take()
    }
}
