use crate::registry::{DocName, RegisteredRoute};
use crate::signature::full_name;

/// Machine name of the generated index page.
pub const INDEX_NAME: &str = "routingtable";
/// Title of the generated index page.
pub const INDEX_LOCALNAME: &str = "HTTP Routing Table";
/// Short name used in index listings.
pub const INDEX_SHORTNAME: &str = "routing table";

/// One line of the routing table: display label, defining document, anchor
/// into that document, and the route synopsis when one was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEntry {
    pub label: String,
    pub doc: DocName,
    pub anchor: String,
    pub synopsis: Option<String>,
}

/// A group of routing entries sharing a path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingGroup {
    pub key: String,
    pub entries: Vec<RoutingEntry>,
}

/* # Why group by the second path segment?

Routes are grouped under their first real path segment: `/users/(int:id)` and
`/users` both land under `/users`, so the table reads as one block per
resource. Paths with no second segment (including `/` itself and paths with
no leading slash) fall back to the whole path as the group key.
*/

/// The generated "HTTP Routing Table" index: groups ordered lexicographically
/// by key, entries within a group ordered by display label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutingTable {
    pub groups: Vec<RoutingGroup>,
}

/// Group key for a path: `/` + the segment after the leading slash, or the
/// whole path when there is none.
fn group_key(path: &str) -> String {
    let mut segments = path.splitn(3, '/');
    let first = segments.next().unwrap_or_default();
    match segments.next() {
        Some(second) => format!("/{}", second),
        None => format!("/{}", first),
    }
}

impl RoutingTable {
    /// Build the table from an enumerated route snapshot.
    pub fn from_routes(routes: &[RegisteredRoute]) -> Self {
        let mut groups: Vec<RoutingGroup> = Vec::new();

        for route in routes {
            let key = group_key(&route.path);
            let entry = RoutingEntry {
                label: full_name(route.method, &route.path),
                doc: route.doc.clone(),
                anchor: route.anchor.clone(),
                synopsis: route.synopsis.clone(),
            };
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.entries.push(entry),
                None => groups.push(RoutingGroup {
                    key,
                    entries: vec![entry],
                }),
            }
        }

        groups.sort_by(|a, b| a.key.cmp(&b.key));
        for group in &mut groups {
            group.entries.sort_by(|a, b| a.label.cmp(&b.label));
        }

        Self { groups }
    }

    /// Render the index as a markdown page, each entry linking to its anchor
    /// in the defining document.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", INDEX_LOCALNAME));

        for group in &self.groups {
            out.push_str(&format!("\n## {}\n\n", group.key));
            for entry in &group.entries {
                out.push_str(&format!(
                    "- [{}]({}#{})",
                    entry.label, entry.doc, entry.anchor
                ));
                if let Some(synopsis) = &entry.synopsis {
                    out.push_str(&format!(" - {}", synopsis));
                }
                out.push('\n');
            }
        }

        out
    }
}
