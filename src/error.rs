//! Error types for fractune.
//!
//! This module provides error types for parameter edits, GPU initialization,
//! and surface management.

use std::fmt;

use crate::params::Group;

/// Errors that can occur when writing to the parameter store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// The value is not representable in the field's numeric type
    /// (NaN or infinite). The store is left unchanged.
    InvalidValue { group: Group, field: usize, value: f32 },
    /// The field index does not exist in the group's schema.
    UnknownField { group: Group, field: usize },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::InvalidValue { group, field, value } => write!(
                f,
                "Value {} is not representable for {:?} field {}",
                value, group, field
            ),
            ParamError::UnknownField { group, field } => {
                write!(f, "Group {:?} has no field {}", group, field)
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Errors that can occur during GPU initialization and surface management.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The drawing surface cannot be (re)allocated at the requested size.
    SurfaceAllocation { width: u32, height: u32 },
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::SurfaceAllocation { width, height } => {
                write!(f, "Cannot allocate drawing surface at {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}
