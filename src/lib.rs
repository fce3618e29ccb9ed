//! Allows parsing and writing binvox voxel grid files. The occupancy payload is kept
//! in its run-length encoded form.
//! # Reading a grid
//! ```
//! let bytes = b"#binvox 1\ndim 2 1 1\ntranslate 0 0 0\nscale 1\ndata\n\x01\x02";
//! let grid = binvox::semantic::parse_bytes(bytes).unwrap();
//! assert_eq!(grid.dimensions(), &[2, 1, 1]);
//! assert_eq!(grid.data().runs().collect::<Vec<_>>(), vec![(1, 2)]);
//! ```

pub mod rle;
pub mod syntax;
pub mod semantic;
