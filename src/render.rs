//! Server-side HTML views.

use axum::response::Html;
use minijinja::{context, Environment};

use crate::error::AppError;
use crate::models::{Note, NoteView};

/// A page and the data it shows.
#[derive(Debug)]
pub enum View<'a> {
    List(&'a [Note]),
    Create,
    Edit(&'a Note),
}

impl View<'_> {
    fn template_name(&self) -> &'static str {
        match self {
            View::List(_) => "index.html",
            View::Create => "create.html",
            View::Edit(_) => "edit.html",
        }
    }
}

/// Holds the parsed templates. Built once at startup, then shared read-only.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("create.html", include_str!("../templates/create.html"))?;
        env.add_template("edit.html", include_str!("../templates/edit.html"))?;
        Ok(Renderer { env })
    }

    pub fn render(&self, view: View<'_>) -> Result<Html<String>, AppError> {
        let tmpl = self.env.get_template(view.template_name())?;
        let html = match view {
            View::List(notes) => {
                let notes: Vec<NoteView> = notes.iter().map(NoteView::from).collect();
                tmpl.render(context! { notes => notes })?
            }
            View::Create => tmpl.render(context! {})?,
            View::Edit(note) => tmpl.render(context! { note => NoteView::from(note) })?,
        };
        Ok(Html(html))
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}
