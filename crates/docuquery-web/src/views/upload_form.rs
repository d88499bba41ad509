//! Document processor card with a URL tab and a file tab.

use docuquery_client::upload::{size_megabytes, FileKind};
use docuquery_client::UploadPolicy;
use docuquery_common::{DocumentSource, PreparedUpload};

use minijinja::{context, Error};
use serde::Serialize;

use super::render;
use crate::state::UploadMode;

/// Summary of the uploaded file shown under the drop zone.
#[derive(Serialize)]
struct UploadedFile<'a> {
    name: &'a str,
    icon: &'static str,
    size_mb: String,
    checksum: &'a str,
}

impl<'a> From<&'a PreparedUpload> for UploadedFile<'a> {
    fn from(upload: &'a PreparedUpload) -> Self {
        Self {
            name: &upload.file_name,
            icon: FileKind::from_name(&upload.file_name).css_class(),
            size_mb: size_megabytes(upload.size),
            checksum: &upload.checksum,
        }
    }
}

pub fn render_upload_form(
    mode: UploadMode,
    document: Option<&DocumentSource>,
    is_loading: bool,
    policy: &UploadPolicy,
) -> Result<String, Error> {
    let uploaded = match document {
        Some(DocumentSource::Upload(upload)) => Some(UploadedFile::from(upload)),
        _ => None,
    };

    render("upload_form.html", context! {
        mode,
        is_loading,
        uploaded,
        accept => policy.accept_attribute(),
        hint => policy.accepted_hint(),
    })
}
