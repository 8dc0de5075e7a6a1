//! # sovran-any
//!
//! A clonable, type-erased value container.
//!
//! `sovran-any` lets you keep values of unrelated types behind one handle,
//! [`AnyValue`], and get them back later through a cast that checks the exact
//! type. It is handy for heterogeneous collections, plugin payloads, or any
//! field whose type is only known to the code that filled it.
//!
//! ## Key Features
//!
//! - **Type-safe**: Casts succeed only for the exact type that was stored
//! - **Value semantics**: Cloning a container clones the value it holds
//! - **Cheap moves**: `take`, `assign` and `swap` never copy the held value
//! - **One error**: Every failed cast reports [`TypeMismatch`]
//! - **Any payload**: [`AnyValue`] takes `Rc`, `RefCell` and other
//!   single-threaded types; [`SyncAnyValue`] takes `Send + Sync` values and
//!   can cross threads
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_any::{any_cast, AnyValue, TypeMismatch};
//!
//! fn main() -> Result<(), TypeMismatch> {
//!     let values = vec![
//!         AnyValue::new(42i32),
//!         AnyValue::new("Hello, world!".to_string()),
//!         AnyValue::new(vec![1, 2, 3, 4, 5]),
//!     ];
//!
//!     let num = any_cast::<i32>(&values[0])?;
//!     let text = any_cast::<String>(&values[1])?;
//!
//!     println!("Number: {}", num);
//!     println!("Text: {}", text);
//!
//!     match any_cast::<bool>(&values[2]) {
//!         Ok(flag) => println!("Flag: {}", flag),
//!         Err(TypeMismatch) => println!("Not a bool"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Copies Are Independent
//!
//! ```rust
//! use sovran_any::{AnyValue, TypeMismatch};
//!
//! let mut original = AnyValue::new(1u32);
//! let copy = original.clone();
//!
//! *original.downcast_mut::<u32>()? += 1;
//!
//! assert_eq!(original.cast::<u32>()?, 2);
//! assert_eq!(copy.cast::<u32>()?, 1);
//! # Ok::<(), TypeMismatch>(())
//! ```
//!
//! ### Moving and Swapping
//!
//! ```rust
//! use sovran_any::{AnyValue, TypeMismatch};
//!
//! let mut a = AnyValue::new('a');
//! let mut b = AnyValue::new("b");
//!
//! a.swap(&mut b);
//! assert_eq!(a.cast::<&str>()?, "b");
//! assert_eq!(b.cast::<char>()?, 'a');
//!
//! let moved = a.take();
//! assert!(!a.has_value());
//! assert!(moved.is::<&str>());
//! # Ok::<(), TypeMismatch>(())
//! ```
//!
//! ### Crossing Threads
//!
//! ```rust
//! use sovran_any::{SyncAnyValue, TypeMismatch};
//! use std::thread;
//!
//! let value = SyncAnyValue::new(vec![1, 2, 3]);
//! let sum = thread::spawn(move || -> Result<i32, TypeMismatch> {
//!     Ok(value.downcast_ref::<Vec<i32>>()?.iter().sum())
//! })
//! .join()
//! .unwrap()?;
//! assert_eq!(sum, 6);
//! # Ok::<(), TypeMismatch>(())
//! ```
//!
//! ## Logging
//!
//! Failed casts emit a `trace` level event through [`tracing`], naming the
//! requested type. Install a subscriber to see them.

mod cast;
mod error;
mod holder;
mod value;

pub use cast::any_cast;
pub use error::TypeMismatch;
pub use value::{AnyValue, ErasedValue, SyncAnyValue};
