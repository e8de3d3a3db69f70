//! DevOps dashboard — HTTP back-end for the pipeline demo.
//!
//! ## Overview
//!
//! A small JSON API (status, echo, version, a random DevOps fact) plus a set
//! of HTML pages that walk through a CI/CD pipeline. The pipeline steps are
//! simulated in the browser with timers and canned output; only the live-API
//! step and the git buttons talk back to the server.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐   HTTP   ┌──────────────────────────────────────────────────┐
//! │ Browser  │ ───────> │  server.rs  (build_router, start_server)         │
//! │          │ <─────── │    ├─ api.rs    (JSON handlers, AppState)        │
//! └──────────┘          │    │     │                                        │
//!                       │    │     │ GitHelper::status/commit/push()        │
//!                       │    │     v                                        │
//!                       │    │  git.rs   (GitRunner trait, ShellGit)        │
//!                       │    │     │                                        │
//!                       │    │     └─> `git` subprocess (tokio::process)    │
//!                       │    │                                              │
//!                       │    └─ pages.rs  (embedded pages, /frontend)       │
//!                       └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Supporting Modules
//!
//! | Module     | Responsibility                                          |
//! |------------|---------------------------------------------------------|
//! | `models`   | Wire types: `StatusResponse`, `EchoResponse`, `Outcome` |
//! | `facts`    | The fixed list behind `/api/devops-fact`                |
//! | `embedded` | Compiles `pages/*.html` into the binary (`rust-embed`)  |
//!
//! ## Failure Semantics
//!
//! Any body failure on `/echo` is a 422. Git and
//! frontend file failures are never escalated: they come back as HTTP 200
//! with `{"output": <error text>, "success": false}`.

pub mod api;
pub mod embedded;
pub mod facts;
pub mod git;
pub mod models;
pub mod pages;
pub mod server;
