//! Static product catalog
//! Products live in code, not in the database. Adding a product here
//! makes it appear in the products API and the quote form dropdown.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<&'static str>,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCategory {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub icon: &'static str,
    pub products: Vec<Product>,
}

/// Derive a product ID from its title: lowercase, runs of
/// non-alphanumerics collapsed into single dashes, edges trimmed
pub fn slug(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    id
}

fn product(
    title: &'static str,
    description: &'static str,
    image: &'static str,
    category: &'static str,
) -> Product {
    Product {
        id: slug(title),
        title,
        description,
        image,
        badge: None,
        price: None,
        category,
    }
}

/// The full catalog, organized by category
pub static CATALOG: Lazy<Vec<ProductCategory>> = Lazy::new(|| {
    vec![
        ProductCategory {
            id: "scaffolding-products",
            title: "🧱 Scaffolding Products",
            badge: Some("Main Products"),
            icon: "faCubes",
            products: vec![
                product(
                    "Scaffolding Tie Rod",
                    "High-strength tie rods for secure scaffolding connections.",
                    "/images/Scaffolding-Tie-Rod.png",
                    "scaffolding-products",
                ),
                product(
                    "Adjustable Steel Props",
                    "Heavy-duty adjustable props for construction support.",
                    "/images/AdjustableSteelProps.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Push Pull Prop",
                    "Versatile push-pull props for wall alignment.",
                    "/images/push-pull-prop.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Steel Scaffolding Parts",
                    "Complete range of steel scaffolding components.",
                    "/images/Steel-Scaffolding-Parts-images.jpg",
                    "scaffolding-products",
                ),
                product(
                    "SB Make MS Adjustable Props",
                    "Premium quality MS adjustable props by SB.",
                    "https://images.unsplash.com/photo-1621905252507-b35492cc74b4?w=400&h=300&fit=crop",
                    "scaffolding-products",
                ),
                product(
                    "Telescopic Steel Props",
                    "Telescopic props with extended height adjustment.",
                    "/images/telescopic-steel-props.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Cuplock Scaffolding System",
                    "Fast and secure cuplock scaffolding system.",
                    "/images/cuplok-system.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Steel Scaffolding Pipe",
                    "Durable MS pipes for scaffolding structures.",
                    "/images/steel-scaffolding-pipes.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Cup Lock System",
                    "Reliable cup lock system for quick assembly.",
                    "/images/CapLockSystem.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Scaffolding Shuttering Clamps",
                    "Heavy-duty clamps for shuttering applications.",
                    "/images/scaffolding-shuttering-clamps.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Tubular Steel Scaffolding",
                    "Standard tubular steel scaffolding systems.",
                    "/images/tubular-steel-scaffolding.jpg",
                    "scaffolding-products",
                ),
                product(
                    "Steel Adjustable Props",
                    "Industrial-grade steel adjustable props.",
                    "/images/steel-adjustable-props.jpg",
                    "scaffolding-products",
                ),
            ],
        },
        ProductCategory {
            id: "material-rental",
            title: "📦 Scaffolding Material & Rental",
            badge: None,
            icon: "faTruck",
            products: vec![
                product(
                    "Scaffolding Rental Service",
                    "Complete scaffolding rental solutions.",
                    "/images/scaffolding-rental-service.jpg",
                    "material-rental",
                ),
                product(
                    "Scaffolding Steel Clamp",
                    "High-quality steel clamps for scaffolding.",
                    "/images/scaffolding-steel-clamp.jpg",
                    "material-rental",
                ),
                product(
                    "Steel Erect Scaffolding",
                    "Ready-to-erect steel scaffolding systems.",
                    "/images/steel-erect-scaffolding.jpg",
                    "material-rental",
                ),
                product(
                    "Scaffolding Products on Hire",
                    "Wide range of scaffolding for hire.",
                    "/images/scaffolding-products-on-hire.jpg",
                    "material-rental",
                ),
                product(
                    "Adjustable U-Jack",
                    "U-head jacks for beam support.",
                    "/images/adjustable-u-jack.jpg",
                    "material-rental",
                ),
                product(
                    "Commercial Construction Scaffolding",
                    "Scaffolding for commercial projects.",
                    "/images/commercial-construction-scaffolding.jpg",
                    "material-rental",
                ),
            ],
        },
        ProductCategory {
            id: "fittings",
            title: "🧩 Scaffolding Fittings",
            badge: None,
            icon: "faCogs",
            products: vec![
                product(
                    "Scaffolding Clamps Fittings",
                    "Premium scaffolding clamp fittings.",
                    "/images/scaffolding-clamps-fittings.jpg",
                    "fittings",
                ),
                product(
                    "Pipe Clamp Fittings Scaffolding",
                    "Pipe clamps for secure connections.",
                    "/images/pipe-clamp-fittings-scaffolding.jpg",
                    "fittings",
                ),
                product(
                    "Waller Plate with Wing Nut",
                    "Waller plates with wing nuts included.",
                    "/images/waller-plate-with-wing-nut.jpg",
                    "fittings",
                ),
            ],
        },
        ProductCategory {
            id: "props-rental",
            title: "🪛 Scaffolding Props Rental",
            badge: None,
            icon: "faTools",
            products: vec![
                product(
                    "Scaffolding Shoring Prop",
                    "Heavy-duty shoring props available.",
                    "/images/scaffolding-shoring-prop.jpg",
                    "props-rental",
                ),
                product(
                    "Centering MS Props",
                    "MS props for centering applications.",
                    "/images/centering-ms-props.jpg",
                    "props-rental",
                ),
                product(
                    "MS Scaffolding Props",
                    "Quality MS scaffolding props on rent.",
                    "/images/ms-scaffolding-props.jpg",
                    "props-rental",
                ),
            ],
        },
        ProductCategory {
            id: "formwork",
            title: "🏗️ Form Work (Accessories)",
            badge: None,
            icon: "faBuilding",
            products: vec![
                product(
                    "Aluminium Formwork Accessories",
                    "Complete aluminium formwork accessories.",
                    "/images/aluminium-formwork-accessories.jpg",
                    "formwork",
                ),
                product(
                    "Modular Aluminium Form Work",
                    "Modular aluminium formwork systems.",
                    "/images/modular-aluminium-form-work.jpg",
                    "formwork",
                ),
                product(
                    "Aluminium Formwork System",
                    "Complete aluminium formwork solutions.",
                    "/images/aluminium-formwork-system.jpg",
                    "formwork",
                ),
            ],
        },
        ProductCategory {
            id: "h-frames",
            title: "🪜 H Frames & Scaffolding",
            badge: None,
            icon: "faBorderAll",
            products: vec![
                product(
                    "MS Aluminium Composite Tower",
                    "MS aluminium composite scaffold towers.",
                    "/images/ms-aluminium-composite-tower.jpg",
                    "h-frames",
                ),
                product(
                    "H Frame Scaffolding",
                    "Easy-to-assemble H-frame systems.",
                    "/images/h-frame-scaffolding.jpg",
                    "h-frames",
                ),
                product(
                    "Light Weight H Frame",
                    "Lightweight H-frame scaffolding.",
                    "/images/light-weight-h-frame.jpg",
                    "h-frames",
                ),
            ],
        },
    ]
});

/// All products as a flat list
pub fn all_products() -> Vec<Product> {
    CATALOG.iter().flat_map(|c| c.products.clone()).collect()
}

/// All product titles, for the quote form dropdown
pub fn product_titles() -> Vec<&'static str> {
    CATALOG
        .iter()
        .flat_map(|c| c.products.iter().map(|p| p.title))
        .collect()
}

/// Find a category by its ID
pub fn category_by_id(id: &str) -> Option<&'static ProductCategory> {
    CATALOG.iter().find(|c| c.id == id)
}
