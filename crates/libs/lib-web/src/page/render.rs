//! # Renderer
//!
//! Server-side HTML for the drop page. Templates are compiled into the binary
//! and autoescaped (`.html` names).

use super::PageView;
use lib_core::{AppError, Result};
use minijinja::{context, Environment};
use tracing::error;

const PAGE_TEMPLATE: &str = "nft_drop.html";
const NOT_FOUND_TEMPLATE: &str = "not_found.html";

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../../templates/nft_drop.html"))
            .map_err(template_error)?;
        env.add_template(NOT_FOUND_TEMPLATE, include_str!("../../templates/not_found.html"))
            .map_err(template_error)?;
        Ok(Self { env })
    }

    pub fn render_page(&self, view: &PageView) -> Result<String> {
        self.env
            .get_template(PAGE_TEMPLATE)
            .and_then(|t| t.render(context! { page => view }))
            .map_err(template_error)
    }

    pub fn render_not_found(&self, slug: &str) -> Result<String> {
        self.env
            .get_template(NOT_FOUND_TEMPLATE)
            .and_then(|t| t.render(context! { slug => slug, brand => super::view::BRAND }))
            .map_err(template_error)
    }
}

fn template_error(e: minijinja::Error) -> AppError {
    error!("[RENDER] Template error: {:#}", e);
    AppError::Internal(format!("template error: {}", e))
}
