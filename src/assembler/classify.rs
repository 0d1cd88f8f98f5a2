use estimate_types::{ContentKind, FormValue, ResourceUri};

/// What a leaf value turns into on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A line of text, already formatted as `label: value`.
    Text(String),
    Image(ResourceUri),
    Document(ResourceUri),
}

/// Decides how a leaf is rendered.
///
/// Strings are treated as attachments only when they are local-file URIs
/// with a known extension; structured references carry their own kind and
/// fall back to the same URI test when they do not.
pub fn classify(label: &str, value: &FormValue) -> Classification {
    let (uri, kind) = match value {
        FormValue::Text(s) => {
            let uri = ResourceUri::from(s.as_str());
            let kind = kind_from_uri(&uri);
            (uri, kind)
        }
        FormValue::Reference { uri, kind } => (uri.clone(), kind.or_else(|| kind_from_uri(uri))),
        other => return Classification::Text(format!("{}: {}", label, other)),
    };
    match kind {
        Some(ContentKind::Image) => Classification::Image(uri),
        Some(ContentKind::Document) => Classification::Document(uri),
        None => Classification::Text(format!("{}: {}", label, uri)),
    }
}

/// Kind implied by a `file://` URI's extension.
pub fn kind_from_uri(uri: &ResourceUri) -> Option<ContentKind> {
    if !uri.is_local_file() {
        return None;
    }
    match uri.extension()?.as_str() {
        "jpg" | "jpeg" | "png" | "gif" => Some(ContentKind::Image),
        "pdf" => Some(ContentKind::Document),
        _ => None,
    }
}

/// Marker line for a container that is being descended into.
pub fn container_line(label: &str, value: &FormValue) -> String {
    format!("{}: {}", label, value)
}

pub fn truncated_line(label: &str) -> String {
    format!("{}: [Truncated]", label)
}
