use larder_core::NutritionAccumulator;
use larder_dom::DomNode;

use super::{hidden_unless, NUTRITION};
use crate::view::Template;

const UNKNOWN: &str = "...";

/// Calorie total and macro split for the current recipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionView {
    pub visible: bool,
}

impl Template for NutritionView {
    type Data = NutritionAccumulator;

    fn region(&self) -> &'static str {
        NUTRITION
    }

    fn markup(&self, acc: &NutritionAccumulator) -> Vec<DomNode> {
        let known = acc.is_known();
        let value = |v: f64| if known { v.to_string() } else { UNKNOWN.to_string() };
        let calories = if known { acc.calories.to_string() } else { UNKNOWN.to_string() };
        let b = acc.aggregate;

        vec![DomNode::new("div")
            .with_class(&hidden_unless("nutri-list", self.visible))
            .with_child(
                DomNode::new("div")
                    .with_class("resultKcalPercent")
                    .with_child(DomNode::text("div", &format!("Total: {} kcal", calories)).with_class("resultKcal"))
                    .with_child(DomNode::text("div", &format!("carb: {} %", value(b.carb))).with_class("carb"))
                    .with_child(DomNode::text("div", &format!("fat: {} %", value(b.fat))).with_class("fat"))
                    .with_child(
                        DomNode::text("div", &format!("protein: {} %", value(b.protein))).with_class("protein"),
                    ),
            )
            .with_child(
                DomNode::text("button", "close")
                    .with_class("closeNutri")
                    .with_attr("title", "close")
                    .with_event("click", "toggle_nutrition"),
            )]
    }
}
