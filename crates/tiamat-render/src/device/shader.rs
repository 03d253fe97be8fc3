use crate::coords::Mat4;

/// Uniform name for the combined view-projection matrix a pool uploads
/// before flushing.
pub const U_VIEW_PROJECTION: &str = "u_view_projection";

/// Uniform name for the sampler; batched textures bind to slot 0.
pub const U_TEXTURE: &str = "u_texture";

/// Shader program the batches draw with.
pub trait Shader {
    fn bind(&self);
    fn set_mat4(&self, name: &str, value: &Mat4);
    fn set_int(&self, name: &str, value: i32);
}
