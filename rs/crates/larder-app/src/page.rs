//! The page: every region in display order.

use larder_render_html::{render_fragment, render_page, PageOptions, RegionHtml};
use larder_view::screens::REGIONS;
use larder_view::{Mutation, Region};

/// Regions changed since the last call to [`Page::take_changes`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionChange {
    pub name: String,
    pub mutations: Vec<Mutation>,
}

#[derive(Debug, Clone)]
pub struct Page {
    regions: Vec<Region>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self { regions: REGIONS.iter().map(|name| Region::new(*name)).collect() }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    /// The region called `name`, appended at the end if the page has none yet.
    pub fn region_mut(&mut self, name: &str) -> &mut Region {
        let index = match self.regions.iter().position(|r| r.name() == name) {
            Some(i) => i,
            None => {
                self.regions.push(Region::new(name));
                self.regions.len() - 1
            }
        };
        &mut self.regions[index]
    }

    pub fn take_changes(&mut self) -> Vec<RegionChange> {
        self.regions
            .iter_mut()
            .filter(|r| r.is_dirty())
            .map(|r| RegionChange { name: r.name().to_string(), mutations: r.take_mutations() })
            .collect()
    }

    pub fn region_html(&self, name: &str) -> Option<String> {
        self.region(name).map(|r| render_fragment(r.children()))
    }

    /// The whole document.
    pub fn to_html(&self) -> String {
        render_page(&PageOptions {
            title: Some("larder // Recipe lookup and meal planning".to_string()),
            description: Some("Search recipes, plan meals and keep a shopping list.".to_string()),
            styles: vec!["css/style.css".to_string()],
            regions: self
                .regions
                .iter()
                .map(|r| RegionHtml { name: r.name(), content: r.children() })
                .collect(),
        })
    }
}
