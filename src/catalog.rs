//! Built-in permission catalog for the logistics admin panel
//!
//! Hand-authored. Deep nodes list their upstream ids explicitly because
//! selection only resolves one hop of dependencies.

use std::sync::OnceLock;

use crate::node::{Group, Leaf, PermissionNode};
use crate::tree::PermissionTree;

static CATALOG: OnceLock<PermissionTree> = OnceLock::new();

/// Logistics services offered on the public sites, as (slug, display name)
const SERVICES: &[(&str, &str)] = &[
    ("air_logistics", "Air Logistics"),
    ("ocean_freight", "Ocean Freight"),
    ("road_transport", "Road Transport"),
    ("rail_freight", "Rail Freight"),
    ("warehousing", "Warehousing"),
    ("customs_clearance", "Customs Clearance"),
    ("project_cargo", "Project Cargo"),
];

/// Affiliated websites with their own blogs, as (slug, display name)
const SITES: &[(&str, &str)] = &[("main", "Company Website"), ("academy", "Logistics Academy")];

/// The process-wide catalog, built on first use and never mutated
pub fn catalog() -> &'static PermissionTree {
    CATALOG.get_or_init(build)
}

fn build() -> PermissionTree {
    let roots = vec![
        dashboard(),
        forms(),
        services(),
        blogs(),
        administration(),
    ];
    match PermissionTree::new(roots) {
        Ok(t) => t,
        // ids are generated from distinct constants; covered by catalog_is_well_formed
        Err(e) => unreachable!("built-in catalog is malformed: {e}"),
    }
}

fn dashboard() -> PermissionNode {
    Group::new("dashboard", "Dashboard", vec![
        Leaf::new("dashboard:view", "View dashboard")
            .requires_any(["enquiry:read", "pickup:read", "career:read", "admission:read", "partner:read"])
            .into(),
    ])
    .into()
}

/// Read/edit/export triple for one business form listing
fn form(prefix: &str, title: &str, extra: Vec<PermissionNode>) -> PermissionNode {
    let read = format!("{prefix}:read");
    let mut children: Vec<PermissionNode> = vec![
        Leaf::new(read.clone(), format!("View {title}")).into(),
        Leaf::new(format!("{prefix}:edit"), format!("Edit {title}")).requires([read.clone()]).into(),
        Leaf::new(format!("{prefix}:export"), format!("Export {title} (CSV)")).requires([read.clone()]).into(),
        Leaf::new(format!("{prefix}:delete"), format!("Delete {title}"))
            .requires([read, format!("{prefix}:edit")])
            .into(),
    ];
    children.extend(extra);
    Group::new(prefix, title, children).into()
}

fn forms() -> PermissionNode {
    Group::new("forms", "Forms", vec![
        form("enquiry", "Enquiries", vec![
            Leaf::new("enquiry:assign", "Assign enquiries to staff").requires(["enquiry:read", "enquiry:edit", "admin:users:read"]).into(),
        ]),
        form("pickup", "Pickup Requests", vec![
            Leaf::new("pickup:schedule", "Schedule pickups").requires(["pickup:read", "pickup:edit"]).into(),
        ]),
        form("career", "Career Applications", vec![
            Leaf::new("career:resume", "Download resumes").requires(["career:read"]).into(),
        ]),
        form("admission", "Institute Admissions", vec![
            Leaf::new("admission:approve", "Approve admissions").requires(["admission:read", "admission:edit"]).into(),
        ]),
        form("partner", "Partner Applications", vec![
            Leaf::new("partner:approve", "Approve partners").requires(["partner:read", "partner:edit"]).into(),
        ]),
    ])
    .into()
}

fn services() -> PermissionNode {
    let children: Vec<PermissionNode> = SERVICES
        .iter()
        .map(|(slug, name)| {
            let read = format!("service:{slug}:read");
            Group::new(format!("service:{slug}"), *name, vec![
                Leaf::new(read.clone(), format!("View {name} page")).into(),
                Leaf::new(format!("service:{slug}:write"), format!("Edit {name} page"))
                    .requires([read, "enquiry:edit".to_string()])
                    .into(),
            ])
            .into()
        })
        .collect();
    Group::new("service", "Services", children).into()
}

fn blogs() -> PermissionNode {
    let children: Vec<PermissionNode> = SITES
        .iter()
        .map(|(site, name)| {
            let read = format!("blog:{site}:read");
            let write = format!("blog:{site}:write");
            Group::new(format!("blog:{site}"), format!("{name} Blog"), vec![
                Leaf::new(read.clone(), "View posts").into(),
                Leaf::new(write.clone(), "Write drafts").requires([read.clone()]).into(),
                Leaf::new(format!("blog:{site}:publish"), "Publish posts").requires([read.clone(), write.clone()]).into(),
                Leaf::new(format!("blog:{site}:delete"), "Delete posts").requires([read, write]).into(),
            ])
            .into()
        })
        .collect();
    Group::new("blog", "Blogs", children).into()
}

fn administration() -> PermissionNode {
    Group::new("admin", "Administration", vec![
        Group::new("admin:roles", "Roles", vec![
            Leaf::new("admin:roles:read", "View roles").into(),
            Leaf::new("admin:roles:write", "Create and edit roles").requires(["admin:roles:read"]).into(),
        ])
        .into(),
        Group::new("admin:users", "Users", vec![
            Leaf::new("admin:users:read", "View users").into(),
            Leaf::new("admin:users:assign_role", "Assign roles to users")
                .requires(["admin:users:read", "admin:roles:read"])
                .into(),
        ])
        .into(),
    ])
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_well_formed() {
        let c = catalog();
        assert!(c.dangling_dependencies().is_empty());
        assert!(c.leaf_ids().len() > 40);
        assert_eq!(c.lookup_label("service:air_logistics:write"), "Edit Air Logistics page");
    }

    #[test]
    fn catalog_is_shared() {
        assert!(std::ptr::eq(catalog(), catalog()));
    }
}
