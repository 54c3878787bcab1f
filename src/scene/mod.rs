//! Scene scripts and the generic scene renderer.
//!
//! Every scene is a [`SceneScript`](script::SceneScript): a list of drawing directives with
//! relative timing offsets, interpreted by [`render_scene`](draw::render_scene).

pub(crate) mod catalog;
pub(crate) mod draw;
pub(crate) mod script;
