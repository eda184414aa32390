use crate::draw::{Annotation, AnnotationKind, AnnotationStore, EditorState, IconKind, Transform};
use crate::util::Point;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version written into every serialised state.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct StateFile<'a> {
    version: u32,
    transform: Transform,
    annotations: Vec<AnnotationRecord<'a>>,
}

/// One annotation as stored on disk. Icons and labels share `id`, `x`, `y`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum AnnotationRecord<'a> {
    Icon {
        id: &'a str,
        x: f64,
        y: f64,
        tool: IconKind,
        size: f64,
        rotation: f64,
    },
    Text {
        id: &'a str,
        x: f64,
        y: f64,
        text: &'a str,
        size: f64,
    },
}

impl<'a> From<&'a Annotation> for AnnotationRecord<'a> {
    fn from(annotation: &'a Annotation) -> Self {
        let Point { x, y } = annotation.position;
        match &annotation.kind {
            AnnotationKind::Icon {
                tool,
                size,
                rotation,
            } => AnnotationRecord::Icon {
                id: &annotation.id,
                x,
                y,
                tool: *tool,
                size: *size,
                rotation: *rotation,
            },
            AnnotationKind::Text { content, size } => AnnotationRecord::Text {
                id: &annotation.id,
                x,
                y,
                text: content,
                size: *size,
            },
        }
    }
}

/// Owned, lenient counterpart of [`AnnotationRecord`] used when loading.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StoredAnnotation {
    Icon {
        #[serde(default)]
        id: String,
        x: f64,
        y: f64,
        tool: IconKind,
        #[serde(default = "default_icon_size")]
        size: f64,
        #[serde(default)]
        rotation: f64,
    },
    Text {
        #[serde(default)]
        id: String,
        x: f64,
        y: f64,
        #[serde(default)]
        text: String,
        #[serde(default = "default_text_size")]
        size: f64,
    },
}

fn default_icon_size() -> f64 {
    crate::draw::annotation::DEFAULT_ICON_SIZE
}

fn default_text_size() -> f64 {
    crate::draw::annotation::DEFAULT_TEXT_SIZE
}

impl StoredAnnotation {
    fn into_annotation(self) -> Option<Annotation> {
        let annotation = match self {
            StoredAnnotation::Icon {
                id,
                x,
                y,
                tool,
                size,
                rotation,
            } => {
                let mut annotation = Annotation::icon(tool, Point::new(x, y)).with_id(id);
                annotation.set_size(size);
                annotation.set_rotation(if rotation.is_finite() { rotation } else { 0.0 });
                annotation
            }
            StoredAnnotation::Text {
                id,
                x,
                y,
                text,
                size,
            } => Annotation::text(text, size, Point::new(x, y)).with_id(id),
        };
        annotation.position.is_finite().then_some(annotation)
    }
}

/// Parsed state before defaults are filled in.
#[derive(Debug, Default)]
pub(crate) struct DecodedState {
    pub transform: Option<Transform>,
    pub annotations: AnnotationStore,
}

/// Serialises the composition to JSON.
pub fn serialize(state: &EditorState) -> serde_json::Result<String> {
    let file = StateFile {
        version: CURRENT_VERSION,
        transform: state.transform,
        annotations: state
            .annotations
            .all()
            .iter()
            .map(AnnotationRecord::from)
            .collect(),
    };
    serde_json::to_string(&file)
}

/// Restores a composition from JSON without ever failing.
///
/// Invalid JSON yields the default state. A missing or unusable transform
/// falls back to identity; annotations that cannot be understood are
/// dropped individually; sizes and rotations are clamped; repeated ids are
/// replaced.
pub fn deserialize(json: &str) -> EditorState {
    let decoded = decode(json);
    EditorState::new(
        decoded.transform.unwrap_or_default(),
        decoded.annotations,
    )
}

/// Restores prior state, or cover-fits a fresh one when there is none.
///
/// When the stored transform is missing (or no state was supplied) and the
/// image size is known, the image is cover-fitted instead of using identity.
pub fn deserialize_or_fit(json: Option<&str>, image_size: Option<(f64, f64)>) -> EditorState {
    let decoded = json
        .filter(|json| !json.trim().is_empty())
        .map(decode)
        .unwrap_or_default();

    let transform = decoded.transform.unwrap_or_else(|| match image_size {
        Some((width, height)) => EditorState::fitted(width, height).transform,
        None => Transform::identity(),
    });
    EditorState::new(transform, decoded.annotations)
}

pub(crate) fn decode(json: &str) -> DecodedState {
    let root: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring unreadable editor state: {}", err);
            return DecodedState::default();
        }
    };
    let Some(root) = root.as_object() else {
        warn!("Ignoring editor state that is not a JSON object");
        return DecodedState::default();
    };

    if let Some(version) = root.get("version").and_then(Value::as_u64)
        && version > u64::from(CURRENT_VERSION)
    {
        warn!(
            "Editor state version {} is newer than supported ({}); loading what is understood",
            version, CURRENT_VERSION
        );
    }

    let transform = root.get("transform").and_then(decode_transform);

    let mut annotations = AnnotationStore::new();
    match root.get("annotations") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                match decode_annotation(entry) {
                    Some(annotation) => {
                        annotations.add(annotation);
                    }
                    None => warn!("Dropping malformed annotation #{} from editor state", index),
                }
            }
        }
        Some(other) if !other.is_null() => {
            warn!("Editor state 'annotations' is not a list; ignoring it");
        }
        _ => {}
    }

    debug!(
        "Decoded editor state: {} annotation(s), transform {}",
        annotations.len(),
        if transform.is_some() { "restored" } else { "missing" }
    );
    DecodedState {
        transform,
        annotations,
    }
}

fn decode_transform(value: &Value) -> Option<Transform> {
    let object = value.as_object()?;
    let field = |name: &str, fallback: f64| {
        object
            .get(name)
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
    };
    Some(Transform::new(field("x", 0.0), field("y", 0.0), field("scale", 1.0)))
}

fn decode_annotation(value: &Value) -> Option<Annotation> {
    let stored: StoredAnnotation = match serde_json::from_value(value.clone()) {
        Ok(stored) => stored,
        Err(err) => {
            debug!("Annotation rejected: {}", err);
            return None;
        }
    };
    stored.into_annotation()
}
