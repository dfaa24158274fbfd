//! Product listing view.

use askama::Template;
use askama_web::WebTemplate;
use leaf_and_co_core::{CartState, Catalog};

use crate::filters;
use crate::routes::shop::NavView;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
    /// The add button is disabled once the product is in the cart.
    pub in_cart: bool,
}

/// One category heading and its products.
#[derive(Clone)]
pub struct CategorySectionView {
    pub name: String,
    pub products: Vec<ProductCardView>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/listing.html")]
pub struct ListingTemplate {
    pub nav: NavView,
    pub notice: Option<String>,
    pub sections: Vec<CategorySectionView>,
}

/// Build the listing sections: catalog categories in order, empty ones skipped.
#[must_use]
pub fn listing_sections(catalog: &Catalog, cart: &CartState) -> Vec<CategorySectionView> {
    catalog
        .grouped()
        .map(|(category, products)| CategorySectionView {
            name: category.to_string(),
            products: products
                .into_iter()
                .map(|product| ProductCardView {
                    id: product.id.to_string(),
                    name: product.name.clone(),
                    price: catalog.price_of(product).display(),
                    image_url: product.image_ref.clone(),
                    in_cart: cart.contains(product.id.as_str()),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_catalog_grouping() {
        let catalog = Catalog::builtin();
        let sections = listing_sections(&catalog, &CartState::new());

        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Easy Care", "Air Purifying", "Low Light", "Statement Plants"]
        );
        assert_eq!(sections[0].products[0].name, "Golden Pothos");
        assert_eq!(sections[0].products[0].price, "₹299.00");
    }

    #[test]
    fn test_in_cart_marks_card() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        cart.add("zz");

        let sections = listing_sections(&catalog, &cart);
        let cards: Vec<&ProductCardView> = sections.iter().flat_map(|s| &s.products).collect();

        for card in cards {
            assert_eq!(card.in_cart, card.id == "zz", "card {}", card.id);
        }
    }
}
