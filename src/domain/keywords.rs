use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use super::summary::ClassCounts;

/// Related keywords per detected class (lowercase keys).
const CONTEXT_KEYWORDS: &[(&str, &[&str])] = &[
    // people
    ("person", &["people", "human", "crowd", "outdoor", "indoor"]),
    ("man", &["person", "male", "people"]),
    ("woman", &["person", "female", "people"]),
    // vehicles
    ("car", &["vehicle", "automobile", "street", "road", "traffic", "outdoor"]),
    ("truck", &["vehicle", "transport", "road", "outdoor"]),
    ("bus", &["vehicle", "public transport", "road", "outdoor"]),
    ("motorcycle", &["vehicle", "two-wheeler", "road", "outdoor"]),
    ("bicycle", &["bike", "cycling", "outdoor", "sport"]),
    // animals
    ("cat", &["pet", "animal", "feline", "indoor", "outdoor"]),
    ("dog", &["pet", "animal", "canine", "outdoor", "indoor"]),
    ("bird", &["animal", "wildlife", "outdoor", "nature"]),
    ("horse", &["animal", "farm", "outdoor", "nature"]),
    // furniture
    ("chair", &["furniture", "indoor", "room", "interior"]),
    ("sofa", &["furniture", "indoor", "room", "interior"]),
    ("bed", &["furniture", "indoor", "room", "bedroom"]),
    ("table", &["furniture", "indoor", "room", "interior"]),
    // electronics
    ("laptop", &["technology", "computer", "indoor", "office"]),
    ("cell phone", &["technology", "mobile", "device", "indoor"]),
    ("tv", &["technology", "television", "indoor", "room"]),
    // food & drink
    ("bottle", &["drink", "container", "indoor", "outdoor"]),
    ("cup", &["drink", "container", "indoor"]),
    ("bowl", &["food", "container", "indoor"]),
    // sport
    ("sports ball", &["sport", "outdoor", "indoor", "game"]),
    ("tennis racket", &["sport", "outdoor", "game"]),
    ("skateboard", &["sport", "outdoor", "recreation"]),
];

/// Scene-level tags, only consulted when a context hint is supplied.
const GENERAL_KEYWORDS: &[(&str, &[&str])] = &[
    ("outdoor", &["street", "road", "park", "nature", "building", "sky"]),
    ("indoor", &["room", "interior", "furniture", "wall", "ceiling"]),
    ("daytime", &["bright", "sunny", "light"]),
    ("nighttime", &["dark", "night", "artificial light"]),
];

const VEHICLES: &[&str] = &["car", "truck", "bus", "motorcycle", "bicycle"];
const FURNITURE: &[&str] = &["chair", "sofa", "bed", "table", "couch"];

/// Number of most frequent classes echoed back as keywords.
const TOP_CLASSES: usize = 3;
/// A scene with more people than this is tagged as a crowd.
const CROWD_THRESHOLD: usize = 2;

static SHARED: LazyLock<ContextKnowledgeBase> = LazyLock::new(ContextKnowledgeBase::builtin);

/// Read-only class → keywords table used to expand detections into tags.
#[derive(Debug, Clone)]
pub struct ContextKnowledgeBase {
    context: HashMap<&'static str, &'static [&'static str]>,
    general: HashMap<&'static str, &'static [&'static str]>,
}

impl ContextKnowledgeBase {
    pub fn builtin() -> Self {
        Self {
            context: CONTEXT_KEYWORDS.iter().copied().collect(),
            general: GENERAL_KEYWORDS.iter().copied().collect(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    pub fn related(&self, class_name: &str) -> &'static [&'static str] {
        self.context.get(class_name).copied().unwrap_or(&[])
    }

    /// Expands detected classes into a sorted, duplicate-free keyword list.
    pub fn infer(&self, counts: &ClassCounts, context: Option<&[String]>) -> Vec<String> {
        let mut keywords = BTreeSet::new();

        for (name, _) in counts.iter() {
            let lower = name.to_lowercase();
            keywords.extend(self.related(&lower).iter().map(|k| k.to_string()));
            keywords.insert(lower);
        }

        keywords.extend(
            counts
                .ranked()
                .into_iter()
                .take(TOP_CLASSES)
                .map(|(name, _)| name.to_lowercase()),
        );

        if counts.get("person") > CROWD_THRESHOLD {
            keywords.extend(["crowd", "people"].map(String::from));
        }
        if VEHICLES.iter().any(|v| counts.contains(v)) {
            keywords.extend(["outdoor", "street", "road"].map(String::from));
        }
        if FURNITURE.iter().any(|f| counts.contains(f)) {
            keywords.extend(["indoor", "interior"].map(String::from));
        }

        for tag in context.unwrap_or_default() {
            if let Some(extra) = self.general.get(tag.to_lowercase().as_str()) {
                keywords.extend(extra.iter().map(|k| k.to_string()));
            }
        }

        keywords.into_iter().collect()
    }
}

pub fn infer_keywords(counts: &ClassCounts) -> Vec<String> {
    ContextKnowledgeBase::shared().infer(counts, None)
}

/// Same as [`infer_keywords`], plus general scene tags for each hint
/// (`outdoor`, `indoor`, `daytime`, `nighttime`). Unknown hints are ignored.
pub fn infer_keywords_with_context(counts: &ClassCounts, hint: Option<&[String]>) -> Vec<String> {
    ContextKnowledgeBase::shared().infer(counts, hint)
}
