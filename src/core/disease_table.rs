use crate::domain::model::{DiseaseRecord, SENTINEL_CLASS};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const HEALTHY: DiseaseRecord = DiseaseRecord {
    symptoms: "No symptoms of disease. The plant is healthy.",
    treatment: "Continue standard care.",
};

const UNRECOGNIZED: DiseaseRecord = DiseaseRecord {
    symptoms: "The image does not clearly match any known plant diseases. Please try a clearer picture of a single leaf.",
    treatment: "Please ensure the image is a plant and is well-lit with a plain background. Re-upload for analysis.",
};

const ENTRIES: &[(&str, DiseaseRecord)] = &[
    (
        "Tomato___Early_blight",
        DiseaseRecord {
            symptoms: "Brown spots with concentric rings on lower leaves.",
            treatment: "Apply a copper-based fungicide. Remove and destroy infected leaves.",
        },
    ),
    ("Apple___healthy", HEALTHY),
    (
        "Corn___Common_rust",
        DiseaseRecord {
            symptoms: "Small, raised, cinnamon-brown pustules on leaves.",
            treatment: "Use resistant corn varieties and apply fungicides if necessary.",
        },
    ),
    (
        "Pepper_bell___Bacterial_spot",
        DiseaseRecord {
            symptoms: "Small, water-soaked spots on leaves and fruit. Leaves may turn yellow and drop.",
            treatment: "Use disease-free seeds and transplants. Apply copper-based bactericides.",
        },
    ),
    ("Pepper_bell___healthy", HEALTHY),
    (
        "Potato___Early_blight",
        DiseaseRecord {
            symptoms: "Dark brown to black spots with concentric rings on lower leaves.",
            treatment: "Rotate crops. Apply fungicides when symptoms appear.",
        },
    ),
    ("Potato___healthy", HEALTHY),
    (
        "Potato___Late_blight",
        DiseaseRecord {
            symptoms: "Irregular, dark-brown or black lesions on leaves and stems.",
            treatment: "Spray with fungicides regularly, ensure proper air circulation.",
        },
    ),
    (
        "Tomato___Target_Spot",
        DiseaseRecord {
            symptoms: "Small, brown spots with a yellow halo, often with a central dot.",
            treatment: "Improve air circulation. Apply fungicides as needed.",
        },
    ),
    (
        "Tomato___Tomato_mosaic_virus",
        DiseaseRecord {
            symptoms: "Mottling, curling, or distortion of leaves. Stunted plant growth.",
            treatment: "Remove and destroy infected plants. Use virus-free seeds.",
        },
    ),
    (
        "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
        DiseaseRecord {
            symptoms: "Yellowing, upward curling of leaves. Stunted plant growth.",
            treatment: "Control whiteflies, the primary vector. Remove infected plants.",
        },
    ),
    (
        "Tomato___Bacterial_spot",
        DiseaseRecord {
            symptoms: "Small, dark, greasy spots on leaves and fruit. Leaf drop may occur.",
            treatment: "Use resistant varieties. Apply copper-based bactericides.",
        },
    ),
    ("Tomato___healthy", HEALTHY),
    (
        "Tomato___Late_blight",
        DiseaseRecord {
            symptoms: "Irregular, dark-brown to purple lesions on leaves and fruit. White mold may appear.",
            treatment: "Apply fungicides. Ensure proper spacing and air circulation.",
        },
    ),
    (
        "Tomato___Leaf_Mold",
        DiseaseRecord {
            symptoms: "Yellowish spots on the top of leaves with olive-green or brown mold on the underside.",
            treatment: "Improve air circulation. Avoid overhead watering.",
        },
    ),
    (
        "Tomato___Septoria_leaf_spot",
        DiseaseRecord {
            symptoms: "Small, circular spots with dark brown margins and a gray center on lower leaves.",
            treatment: "Remove infected leaves. Apply fungicides.",
        },
    ),
    (
        "Tomato___Spider_mites_Two-spotted_spider_mite",
        DiseaseRecord {
            symptoms: "Tiny yellow or white spots on leaves. Fine webbing on the underside of leaves.",
            treatment: "Spray with insecticidal soap or horticultural oil.",
        },
    ),
    (SENTINEL_CLASS, UNRECOGNIZED),
];

static DISEASE_TABLE: Lazy<DiseaseTable> = Lazy::new(|| DiseaseTable::from_entries(ENTRIES));

/// Read-only mapping from class label to symptoms/treatment text.
#[derive(Debug, Clone)]
pub struct DiseaseTable {
    records: HashMap<&'static str, DiseaseRecord>,
}

impl DiseaseTable {
    /// The built-in table, constructed on first access.
    pub fn builtin() -> &'static DiseaseTable {
        &DISEASE_TABLE
    }

    /// Builds a table from `entries`; the sentinel is inserted when missing so
    /// that [`DiseaseTable::sentinel`] is always answerable.
    pub fn from_entries(entries: &[(&'static str, DiseaseRecord)]) -> Self {
        let mut records: HashMap<&'static str, DiseaseRecord> = entries.iter().copied().collect();
        records.entry(SENTINEL_CLASS).or_insert(UNRECOGNIZED);
        Self { records }
    }

    pub fn get(&self, class_label: &str) -> Option<&DiseaseRecord> {
        self.records.get(class_label)
    }

    pub fn sentinel(&self) -> &DiseaseRecord {
        self.records.get(SENTINEL_CLASS).unwrap_or(&UNRECOGNIZED)
    }

    pub fn contains(&self, class_label: &str) -> bool {
        self.records.contains_key(class_label)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Known class labels, sentinel excluded, sorted.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = self
            .records
            .keys()
            .copied()
            .filter(|label| *label != SENTINEL_CLASS)
            .collect();
        labels.sort_unstable();
        labels
    }
}
