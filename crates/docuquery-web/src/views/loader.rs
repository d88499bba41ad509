//! Progress indicator shown while a request is in flight.

use std::cmp::Ordering;

use minijinja::{context, Error};
use serde::Serialize;

use super::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStage {
    Upload,
    Parsing,
    Analysis,
    Complete,
}

impl LoaderStage {
    pub const ALL: [LoaderStage; 4] = [
        LoaderStage::Upload,
        LoaderStage::Parsing,
        LoaderStage::Analysis,
        LoaderStage::Complete,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LoaderStage::Upload => "upload",
            LoaderStage::Parsing => "parsing",
            LoaderStage::Analysis => "analysis",
            LoaderStage::Complete => "complete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoaderStage::Upload => "Processing Document",
            LoaderStage::Parsing => "Extracting Content",
            LoaderStage::Analysis => "AI Analysis",
            LoaderStage::Complete => "Complete",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Width of the progress bar.
    pub fn progress_percent(self) -> usize {
        (self.index() + 1) * 25
    }
}

#[derive(Serialize)]
struct Step {
    key: &'static str,
    label: &'static str,
    state: &'static str,
}

pub fn render_loader(stage: LoaderStage, message: Option<&str>) -> Result<String, Error> {
    let active = stage.index();
    let steps: Vec<Step> = LoaderStage::ALL.iter().enumerate().map(|(i, s)| Step {
        key: s.key(),
        label: s.label(),
        state: match i.cmp(&active) {
            Ordering::Less => "completed",
            Ordering::Equal => "active",
            Ordering::Greater => "pending",
        },
    }).collect();

    render("loader.html", context! {
        steps,
        message,
        progress => stage.progress_percent(),
    })
}
