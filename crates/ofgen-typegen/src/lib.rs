//! Typesafe OpenFeature flag accessors generated from a flag manifest.
//!
//! `ofgen-typegen` loads a validated manifest into a sorted [`Flagset`] and
//! renders it through a per-language backend into source files that wrap an
//! OpenFeature SDK client with one accessor per flag.
//!
//! # Architecture
//!
//! ```text
//! Input             IR                Output Backends
//! ─────────     ─────────────     ──────────────────────
//!                                 ┌─> Go        (<package>.go)
//!                                 ├─> C#        (OpenFeature.g.cs)
//! flags.json ─> Flagset ──────────┼─> Java      (OpenFeature.java)
//!  (input/)     (ir.rs)           ├─> Python    (openfeature.py)
//!                  │              ├─> Node.js   (openfeature.ts)
//!                  └─ Generator   ├─> React     (openfeature.ts)
//!                    (render.rs)  └─> NestJS    (openfeature-decorators.ts + openfeature.ts)
//! ```
//!
//! Backends only describe a target: type mappings, literals, parameters,
//! imports, and templates. The [`Generator`] filters flags the backend cannot
//! represent, renders every template in memory, and writes the results.
//!
//! # Example
//!
//! ```
//! use ofgen_typegen::{BackendRegistry, Generator, GeneratorParams, input};
//!
//! let flagset = input::load(br#"{
//!     "flags": {
//!         "enableFeatureA": {"flagType": "boolean", "defaultValue": false}
//!     }
//! }"#).unwrap();
//!
//! let registry = BackendRegistry::with_builtins();
//! let go = registry.get("go").unwrap();
//! let files = Generator::new(go, &flagset)
//!     .render(&GeneratorParams::new("out"))
//!     .unwrap();
//! assert!(files[0].contents.contains("var EnableFeatureA"));
//! ```
//!
//! # Feature Flags
//!
//! Backend flags (use `backend-*` prefix):
//! - `backend-go` - Go SDK accessors
//! - `backend-csharp` - .NET SDK client
//! - `backend-java` - Java SDK client
//! - `backend-python` - Python SDK client
//! - `backend-nodejs` - JavaScript server SDK client
//! - `backend-react` - React SDK hooks
//! - `backend-nestjs` - NestJS decorators (implies `backend-nodejs`)
//!
//! Language umbrella flags:
//! - `typescript` - backend-nodejs + backend-react + backend-nestjs
//! - `go`, `csharp`, `java`, `python`

pub mod cancel;
pub mod case;
pub mod events;
pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod render;
pub mod traits;

pub use cancel::{CancelToken, Cancelled};
pub use events::{Event, NullReporter, RecordingReporter, Reporter};
pub use input::{LoadError, load, load_path};
pub use ir::{Flag, FlagType, Flagset};
pub use registry::BackendRegistry;
pub use render::{
    GenerateError, Generator, GeneratorParams, RenderedFile, generate_from_manifest,
};
pub use traits::{Backend, LiteralError, ParamSpec, Stability, TemplateFile};
