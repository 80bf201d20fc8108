use serde::Serialize;

/// Agronomic guidance shown next to a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseAdvice {
    pub label: &'static str,
    pub cause: &'static str,
    pub remedy: &'static str,
}

const TABLE: &[DiseaseAdvice] = &[
    DiseaseAdvice {
        label: "late_blight",
        cause: "Caused by the fungus-like organism Phytophthora infestans. It spreads quickly in cool, moist environments.",
        remedy: "Use certified disease-free seeds, ensure proper field drainage, remove infected plants, and spray fungicides like Mancozeb or Metalaxyl.",
    },
    DiseaseAdvice {
        label: "early_blight",
        cause: "Caused by the fungus Alternaria solani. Often impacts older leaves first.",
        remedy: "Rotate crops, remove plant debris, maintain proper spacing, and apply chlorothalonil or copper-based fungicides.",
    },
    DiseaseAdvice {
        label: "healthy",
        cause: "No disease detected.",
        remedy: "Maintain regular irrigation, balanced fertilizers, and monitor leaves weekly to prevent infections.",
    },
    DiseaseAdvice {
        label: "black_rot",
        cause: "Caused by the bacterium Xanthomonas campestris. Spread through water, insects, and infected soil.",
        remedy: "Use disease-free seeds, avoid overhead irrigation, remove infected leaves, and apply copper-based sprays.",
    },
    DiseaseAdvice {
        label: "brown_spot",
        cause: "Caused by the fungus Bipolaris oryzae. Common in rice plants grown in nutrient-poor soils.",
        remedy: "Apply nitrogen fertilizer appropriately, remove weeds, improve field drainage, and use fungicides like propiconazole.",
    },
    DiseaseAdvice {
        label: "leaf_blast",
        cause: "Caused by the rice blast fungus Magnaporthe oryzae. Favors humid and warm conditions.",
        remedy: "Avoid excess nitrogen, maintain good spacing, use resistant rice varieties, and apply tricyclazole fungicide.",
    },
    DiseaseAdvice {
        label: "hispa",
        cause: "Caused by the rice hispa beetle (Dicladispa armigera). Larvae feed on plant tissue.",
        remedy: "Spray neem oil, avoid overuse of fertilizers, hand-pick adult beetles, or use approved insecticides like chlorpyrifos.",
    },
];

/// Guidance for a lowercase label, if the table has an entry for it.
pub fn lookup(label: &str) -> Option<&'static DiseaseAdvice> {
    TABLE.iter().find(|a| a.label == label)
}

/// Every label with guidance, in table order.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|a| a.label)
}
