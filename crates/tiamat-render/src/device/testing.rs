//! Recording doubles for the device seams.
//!
//! Every call that would touch the GPU lands in one shared [`EventLog`], so
//! tests can assert what was drawn, in what order, without a device.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Result, bail};

use crate::coords::{Mat4, Viewport};
use crate::device::{
    BufferKind, GpuBuffer, GpuDevice, GpuTexture, OffscreenTarget, Primitive, Shader, TextureId,
    TextureRegistry,
};
use crate::render::RenderCtx;

/// Everything the doubles record, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuEvent {
    BufferCreated {
        kind: BufferKind,
        size: usize,
        init: Option<Vec<u8>>,
    },
    BufferUpload {
        kind: BufferKind,
        offset: usize,
        len: usize,
    },
    TextureCreated {
        id: u32,
        width: u32,
        height: u32,
    },
    TextureBound {
        id: u32,
    },
    ShaderBound,
    Mat4Set {
        name: String,
    },
    IntSet {
        name: String,
        value: i32,
    },
    DrawIndexed {
        count: usize,
        primitive: Primitive,
    },
    TargetStarted {
        texture: u32,
        restore: (u32, u32),
    },
    TargetEnded,
}

pub type EventLog = Rc<RefCell<Vec<GpuEvent>>>;

pub struct RecordingDevice {
    log: EventLog,
    next_texture: Cell<u32>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::with_log(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn with_log(log: EventLog) -> Self {
        Self { log, next_texture: Cell::new(1) }
    }
}

impl GpuDevice for RecordingDevice {
    fn create_buffer(
        &self,
        kind: BufferKind,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuBuffer>> {
        self.log.borrow_mut().push(GpuEvent::BufferCreated {
            kind,
            size,
            init: data.map(<[u8]>::to_vec),
        });
        Ok(Box::new(RecordingBuffer { kind, log: self.log.clone() }))
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        _data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuTexture>> {
        let id = self.next_texture.get();
        self.next_texture.set(id + 1);
        self.log.borrow_mut().push(GpuEvent::TextureCreated { id, width, height });
        Ok(Box::new(RecordingTexture { id, width, height, log: self.log.clone() }))
    }
}

/// Device whose every creation fails, for exercising allocation fallbacks.
pub struct FailingDevice;

impl GpuDevice for FailingDevice {
    fn create_buffer(
        &self,
        _kind: BufferKind,
        _size: usize,
        _data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuBuffer>> {
        bail!("buffer creation refused")
    }

    fn create_texture(
        &self,
        _width: u32,
        _height: u32,
        _data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuTexture>> {
        bail!("texture creation refused")
    }
}

struct RecordingBuffer {
    kind: BufferKind,
    log: EventLog,
}

impl GpuBuffer for RecordingBuffer {
    fn bind(&self) {}

    fn unbind(&self) {}

    fn upload(&mut self, offset: usize, data: &[u8]) {
        self.log.borrow_mut().push(GpuEvent::BufferUpload {
            kind: self.kind,
            offset,
            len: data.len(),
        });
    }

    fn draw_indexed(&self, count: usize, primitive: Primitive) {
        self.log.borrow_mut().push(GpuEvent::DrawIndexed { count, primitive });
    }
}

struct RecordingTexture {
    id: u32,
    width: u32,
    height: u32,
    log: EventLog,
}

impl GpuTexture for RecordingTexture {
    fn id(&self) -> u32 {
        self.id
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn bind(&self) {
        self.log.borrow_mut().push(GpuEvent::TextureBound { id: self.id });
    }
}

pub struct RecordingShader {
    log: EventLog,
}

impl Shader for RecordingShader {
    fn bind(&self) {
        self.log.borrow_mut().push(GpuEvent::ShaderBound);
    }

    fn set_mat4(&self, name: &str, _value: &Mat4) {
        self.log.borrow_mut().push(GpuEvent::Mat4Set { name: name.to_owned() });
    }

    fn set_int(&self, name: &str, value: i32) {
        self.log.borrow_mut().push(GpuEvent::IntSet { name: name.to_owned(), value });
    }
}

pub struct RecordingTarget {
    log: EventLog,
    pub active: bool,
}

impl OffscreenTarget for RecordingTarget {
    fn start(&mut self, restore_width: u32, restore_height: u32, target: &dyn GpuTexture) {
        self.active = true;
        self.log.borrow_mut().push(GpuEvent::TargetStarted {
            texture: target.id(),
            restore: (restore_width, restore_height),
        });
    }

    fn end(&mut self) {
        self.active = false;
        self.log.borrow_mut().push(GpuEvent::TargetEnded);
    }
}

/// Bundle of doubles plus a registry, enough to build a [`RenderCtx`].
pub struct TestGpu {
    pub device: RecordingDevice,
    pub textures: TextureRegistry,
    pub target: RecordingTarget,
    pub log: EventLog,
    shader: Rc<RecordingShader>,
}

impl TestGpu {
    pub fn new() -> Self {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        Self {
            device: RecordingDevice::with_log(log.clone()),
            textures: TextureRegistry::new(),
            target: RecordingTarget { log: log.clone(), active: false },
            shader: Rc::new(RecordingShader { log: log.clone() }),
            log,
        }
    }

    /// Fresh context borrowing the bundle; call per operation.
    pub fn ctx(&mut self) -> RenderCtx<'_> {
        RenderCtx::new(
            &self.device,
            &mut self.textures,
            &mut self.target,
            Viewport::new(800.0, 600.0),
        )
    }

    pub fn shader(&self) -> Rc<dyn Shader> {
        self.shader.clone()
    }

    pub fn add_texture(&mut self, width: u32, height: u32) -> TextureId {
        self.textures.create(&self.device, width, height, None).unwrap()
    }

    /// Backend-native id of a registered texture.
    pub fn native_id(&self, id: TextureId) -> u32 {
        self.textures.get(id).unwrap().id()
    }

    pub fn events(&self) -> Vec<GpuEvent> {
        self.log.borrow().clone()
    }

    /// Drains recorded events, isolating the next phase of a test.
    pub fn take_events(&self) -> Vec<GpuEvent> {
        self.log.borrow_mut().drain(..).collect()
    }
}
