use larder_core::ShopItem;
use larder_dom::DomNode;

use super::SHOPPING;
use crate::view::Template;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShoppingListView;

impl Template for ShoppingListView {
    type Data = [ShopItem];

    fn region(&self) -> &'static str {
        SHOPPING
    }

    fn markup(&self, items: &[ShopItem]) -> Vec<DomNode> {
        vec![DomNode::new("ul").with_class("shop__list").with_children(items.iter().map(|item| {
            let id = item.id.to_string();
            DomNode::new("li")
                .with_class("shopItem")
                .with_key(id.as_str())
                .with_child(DomNode::text("span", &item.text).with_class("shopItem__text"))
                .with_child(
                    DomNode::text("button", "x")
                        .with_class("deleteShopItem")
                        .with_attr("data-id", id)
                        .with_event("click", "remove_shop_item"),
                )
        }))]
    }

    fn message(&self) -> &'static str {
        "Nothing to buy yet"
    }
}
