use larder_dom::DomNode;

use super::{hidden_unless, UPLOAD};
use crate::view::Template;

pub const DEFAULT_INGREDIENT_ROWS: usize = 3;

/// (name, label, input type) of each recipe data field, in form order.
const DATA_FIELDS: &[(&str, &str, &str)] = &[
    ("title", "Title", "text"),
    ("sourceUrl", "URL", "text"),
    ("image", "Image URL", "text"),
    ("publisher", "Publisher", "text"),
    ("cookingTime", "Prep time", "number"),
    ("servings", "Servings", "number"),
];

const UNITS: &[&str] = &["g", "kg", "ml", "l", "tsp", "tbsp", "cup", "oz", "lb", "pcs"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngredientRow {
    pub description: String,
    pub quantity: String,
    pub unit: String,
}

/// What the add-recipe modal shows: visibility plus the values typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub visible: bool,
    pub fields: Vec<(String, String)>,
    pub rows: Vec<IngredientRow>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            visible: false,
            fields: Vec::new(),
            rows: vec![IngredientRow::default(); DEFAULT_INGREDIENT_ROWS],
        }
    }
}

impl UploadForm {
    /// Rebuild from the entries a rendered form currently holds.
    pub fn from_entries(visible: bool, entries: &[(String, String)]) -> Self {
        let mut fields = Vec::new();
        let mut rows: Vec<IngredientRow> = Vec::new();
        for (name, value) in entries {
            match name.as_str() {
                "ingr-description" => rows.push(IngredientRow { description: value.clone(), ..Default::default() }),
                "ingr-quantity" => {
                    if let Some(row) = rows.last_mut() {
                        row.quantity = value.clone();
                    }
                }
                "ingr-unit" => {
                    if let Some(row) = rows.last_mut() {
                        row.unit = value.clone();
                    }
                }
                _ => fields.push((name.clone(), value.clone())),
            }
        }
        Self { visible, fields, rows }
    }

    pub fn add_row(&mut self) {
        self.rows.push(IngredientRow::default());
    }

    /// Drop row `index`. Out-of-range indexes are ignored.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.rows.remove(index);
            true
        } else {
            false
        }
    }

    fn field(&self, name: &str) -> &str {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()).unwrap_or("")
    }
}

fn input(name: &str, kind: &str, value: &str) -> DomNode {
    DomNode::new("input")
        .with_attr("name", name)
        .with_attr("type", kind)
        .with_attr("value", value)
        .with_attr("autocomplete", "off")
}

fn ingredient_row(index: usize, row: &IngredientRow) -> DomNode {
    DomNode::new("div")
        .with_class("input_inline")
        .with_attr("data-row", index.to_string())
        .with_child(input("ingr-description", "text", &row.description).with_attr("placeholder", "Description"))
        .with_child(
            input("ingr-quantity", "number", &row.quantity)
                .with_attr("step", "0.25")
                .with_attr("placeholder", "Quantity"),
        )
        .with_child(
            input("ingr-unit", "text", &row.unit)
                .with_attr("list", "units")
                .with_attr("placeholder", "Unit"),
        )
        .with_child(
            DomNode::text("button", "x")
                .with_class("deleteIngr")
                .with_attr("type", "button")
                .with_attr("data-row", index.to_string())
                .with_event("click", "remove_ingredient_row"),
        )
}

/// The add-recipe modal.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadView;

impl Template for UploadView {
    type Data = UploadForm;

    fn region(&self) -> &'static str {
        UPLOAD
    }

    fn markup(&self, form: &UploadForm) -> Vec<DomNode> {
        let data_column = DomNode::new("div")
            .with_class("upload__column")
            .with_child(DomNode::text("h3", "Recipe data").with_class("upload__heading"))
            .with_children(DATA_FIELDS.iter().flat_map(|(name, label, kind)| {
                [
                    DomNode::text("label", label),
                    input(name, kind, form.field(name)).with_attr("required", "required"),
                ]
            }));

        let ingredient_column = DomNode::new("div")
            .with_class("upload__column input_inlines")
            .with_child(DomNode::text("h3", "Ingredients").with_class("upload__heading"))
            .with_children(form.rows.iter().enumerate().map(|(i, row)| ingredient_row(i, row)))
            .with_child(
                DomNode::text("button", "Add ingredient")
                    .with_class("addIngr")
                    .with_attr("type", "button")
                    .with_event("click", "add_ingredient_row"),
            )
            .with_child(
                DomNode::new("datalist")
                    .with_attr("id", "units")
                    .with_children(UNITS.iter().map(|u| DomNode::new("option").with_attr("value", *u))),
            );

        vec![
            DomNode::new("div")
                .with_class(&hidden_unless("overlay", form.visible))
                .with_event("click", "toggle_add_recipe"),
            DomNode::new("div")
                .with_class(&hidden_unless("add-recipe-window", form.visible))
                .with_child(
                    DomNode::text("button", "×")
                        .with_class("btn--close-modal")
                        .with_event("click", "toggle_add_recipe"),
                )
                .with_child(
                    DomNode::new("form")
                        .with_class("upload")
                        .with_event("submit", "upload_recipe")
                        .with_child(data_column)
                        .with_child(ingredient_column)
                        .with_child(
                            DomNode::new("button")
                                .with_class("btn upload__btn")
                                .with_child(DomNode::text("span", "Upload")),
                        ),
                ),
        ]
    }

    fn message(&self) -> &'static str {
        "Recipe was successfully uploaded"
    }
}
