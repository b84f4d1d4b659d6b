//! voxel_terrain - Chunked voxel storage and marching cubes meshing
//!
//! This crate manages a mutable scalar density field split into fixed-size
//! chunks and extracts triangulated isosurfaces from it.
//!
//! # Features
//!
//! - **Chunked store**: world-space point and box queries that keep the
//!   samples shared by neighbouring chunks consistent
//! - **Background generation**: chunk data produced on rayon's pool and
//!   reconciled on first access
//! - **Marching Cubes**: table-driven extraction with atomic slot reservation
//!   for lock-free parallel output
//! - **Meshing stage**: enqueue → tick → drain queue fed by dirty chunks
//!
//! # Example
//!
//! ```ignore
//! use voxel_terrain::{
//!   marching_cubes, DensityFnGenerator, GenerationHandle, MeshConfig, VoxelDataStore,
//!   WorldSettings,
//! };
//! use glam::IVec3;
//! use std::sync::Arc;
//!
//! let settings = WorldSettings::cubic(16)?;
//! let mut store = VoxelDataStore::new(settings);
//! let terrain = Arc::new(DensityFnGenerator::new(|p: IVec3| p.y as f32 - 8.0));
//!
//! let handle = GenerationHandle::spawn(terrain, IVec3::ZERO, settings);
//! store.set_voxel_data_job_handle(handle, IVec3::ZERO);
//!
//! // Dig a hole; blocks on the pending job first
//! store.set_voxel_data(1.0, IVec3::new(4, 7, 4));
//!
//! let chunk = store.try_get_voxel_data_chunk(IVec3::ZERO).unwrap();
//! let output = marching_cubes::generate_parallel(chunk, &MeshConfig::default());
//!
//! println!("Generated {} vertices, {} triangles",
//!     output.vertex_count(), output.triangle_count());
//! ```

pub mod bounds;
pub mod chunk_properties;
pub mod config;
pub mod coords;
pub mod edge_table;
pub mod error;
pub mod generation;
pub mod triangle_table;
pub mod types;
pub mod volume;

// Re-export commonly used items
pub use bounds::BoundsInt;
pub use chunk_properties::{ChunkProperties, ChunkPropertiesStore};
pub use config::{WorldSettings, DEFAULT_CHUNK_SIZE};
pub use coords::{chunk_coordinates_containing_point, world_to_chunk, world_to_local};
pub use edge_table::{CUBE_CORNERS, EDGE_CORNERS, EDGE_TABLE};
pub use error::VoxelError;
pub use generation::{DensityFnGenerator, GenerationHandle, VoxelDataGenerator};
pub use triangle_table::{triangle_list_for, TriangleList};
pub use types::{MeshConfig, MeshOutput, MeshingVertex, MinMaxAABB, NormalMode, VoxelColor};
pub use volume::{Allocation, VoxelVolume};

// Marching cubes extraction
pub mod marching_cubes;
pub use marching_cubes::VertexCounter;

// Chunk store
pub mod store;
pub use store::VoxelDataStore;

// Task queue for parallel meshing
pub mod task_queue;
pub use task_queue::{MeshCompletion, MeshRequest, MeshingStage};
