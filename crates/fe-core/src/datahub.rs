//! Asset topology, field mapping and stream log for the Data Hub page.
//!
//! Everything here is a fixed mock; nothing is ingested.

use std::collections::HashSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Site,
    Building,
    Equipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Online,
    Warning,
    Offline,
}

impl NodeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::Online => "Online",
            NodeStatus::Warning => "Warning",
            NodeStatus::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyNode {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: NodeKind,
    /// Only equipment reports a status.
    pub status: Option<NodeStatus>,
    pub children: Vec<TopologyNode>,
}

impl TopologyNode {
    fn group(id: &'static str, name: &'static str, kind: NodeKind, children: Vec<TopologyNode>) -> Self {
        Self { id, name, kind, status: None, children }
    }

    fn equipment(id: &'static str, name: &'static str, status: NodeStatus) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Equipment,
            status: Some(status),
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Nodes expanded when the page first opens.
pub const DEFAULT_EXPANDED: [&str; 2] = ["site-1", "bldg-1a"];

/// Equipment selected when the page first opens.
pub const DEFAULT_EQUIPMENT: &str = "eq-1";

pub fn topology() -> Vec<TopologyNode> {
    use NodeKind::{Building, Site};
    use NodeStatus::{Offline, Online, Warning};

    vec![
        TopologyNode::group(
            "site-1",
            "Taipei HQ",
            Site,
            vec![
                TopologyNode::group(
                    "bldg-1a",
                    "Building A",
                    Building,
                    vec![
                        TopologyNode::equipment("eq-1", "Chiller-1 (Main)", Online),
                        TopologyNode::equipment("eq-2", "AHU-Roof", Warning),
                        TopologyNode::equipment("eq-3", "Smart Meter (Floor 5)", Online),
                    ],
                ),
                TopologyNode::group(
                    "bldg-1b",
                    "Data Center Annex",
                    Building,
                    vec![
                        TopologyNode::equipment("eq-4", "CRAC-1", Online),
                        TopologyNode::equipment("eq-5", "UPS Bank A", Online),
                    ],
                ),
            ],
        ),
        TopologyNode::group(
            "site-2",
            "Taichung Plant",
            Site,
            vec![TopologyNode::group(
                "bldg-2a",
                "Fab 1",
                Building,
                vec![TopologyNode::equipment("eq-6", "Air Compressor 01", Offline)],
            )],
        ),
    ]
}

/// Depth-first search by id.
pub fn find_node<'a>(nodes: &'a [TopologyNode], id: &str) -> Option<&'a TopologyNode> {
    nodes.iter().find_map(|n| {
        if n.id == id {
            Some(n)
        } else {
            find_node(&n.children, id)
        }
    })
}

/// One line of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeRow<'a> {
    pub depth: usize,
    pub node: &'a TopologyNode,
    pub expanded: bool,
}

/// Rows currently visible: children appear only under expanded parents.
pub fn visible_rows<'a>(nodes: &'a [TopologyNode], expanded: &HashSet<&str>) -> Vec<TreeRow<'a>> {
    fn walk<'a>(nodes: &'a [TopologyNode], depth: usize, expanded: &HashSet<&str>, out: &mut Vec<TreeRow<'a>>) {
        for node in nodes {
            let open = expanded.contains(node.id);
            out.push(TreeRow { depth, node, expanded: open });
            if open {
                walk(&node.children, depth + 1, expanded, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(nodes, 0, expanded, &mut out);
    out
}

/// Equipment counts as `(online, warning, offline)`.
pub fn status_counts(nodes: &[TopologyNode]) -> (usize, usize, usize) {
    nodes.iter().fold((0, 0, 0), |(on, warn, off), n| {
        let (c_on, c_warn, c_off) = status_counts(&n.children);
        let own = match n.status {
            Some(NodeStatus::Online) => (1, 0, 0),
            Some(NodeStatus::Warning) => (0, 1, 0),
            Some(NodeStatus::Offline) => (0, 0, 1),
            None => (0, 0, 0),
        };
        (on + c_on + own.0, warn + c_warn + own.1, off + c_off + own.2)
    })
}

// ---------------------------------------------------------------------------
// Field mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemVariable {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SYSTEM_VARIABLES: [SystemVariable; 6] = [
    SystemVariable { id: "sys_temp_in", label: "Chilled Water Inlet Temp (°C)" },
    SystemVariable { id: "sys_temp_out", label: "Chilled Water Outlet Temp (°C)" },
    SystemVariable { id: "sys_flow", label: "Water Flow Rate (L/s)" },
    SystemVariable { id: "sys_power", label: "Active Power (kW)" },
    SystemVariable { id: "sys_energy", label: "Accumulated Energy (kWh)" },
    SystemVariable { id: "sys_time", label: "Observation Time" },
];

/// Source column and the system variable it is bound to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    pub source: &'static str,
    pub target: Option<SystemVariable>,
}

pub fn field_mappings() -> Vec<FieldMapping> {
    let var = |id: &str| SYSTEM_VARIABLES.iter().copied().find(|v| v.id == id);
    vec![
        FieldMapping { source: "T_in", target: var("sys_temp_in") },
        FieldMapping { source: "T_out", target: var("sys_temp_out") },
        FieldMapping { source: "Flow_Rate", target: None },
        FieldMapping { source: "Power_kW", target: var("sys_power") },
        FieldMapping { source: "Timestamp_Raw", target: None },
    ]
}

// ---------------------------------------------------------------------------
// Stream pulse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamHealth {
    pub throughput_pts_per_sec: u32,
    pub completeness_percent: f64,
}

pub const STREAM_HEALTH: StreamHealth = StreamHealth {
    throughput_pts_per_sec: 24,
    completeness_percent: 99.8,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Success,
    Warning,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncLogEntry {
    pub id: u32,
    pub time: &'static str,
    pub level: LogLevel,
    pub message: &'static str,
}

/// Newest first.
pub fn sync_log() -> Vec<SyncLogEntry> {
    vec![
        SyncLogEntry {
            id: 1,
            time: "10:45:01",
            level: LogLevel::Success,
            message: "API Sync complete: 140 records fetched (Chiller-1)",
        },
        SyncLogEntry {
            id: 2,
            time: "10:30:12",
            level: LogLevel::Warning,
            message: "CSV Parse Warning: Row 45 detected Null value in [Flow_Rate]",
        },
        SyncLogEntry {
            id: 3,
            time: "10:15:00",
            level: LogLevel::Info,
            message: "Stream initialized for Smart Meter (Floor 5)",
        },
        SyncLogEntry {
            id: 4,
            time: "09:00:23",
            level: LogLevel::Success,
            message: "Nightly batch processing completed.",
        },
        SyncLogEntry {
            id: 5,
            time: "08:42:11",
            level: LogLevel::Error,
            message: "Connection timeout to CRAC-1 MQTT Broker.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_expanded() -> HashSet<&'static str> {
        DEFAULT_EXPANDED.into_iter().collect()
    }

    #[test]
    fn default_tree_shows_first_building() {
        let nodes = topology();
        let rows = visible_rows(&nodes, &default_expanded());
        let names: Vec<&str> = rows.iter().map(|r| r.node.name).collect();
        assert_eq!(
            names,
            [
                "Taipei HQ",
                "Building A",
                "Chiller-1 (Main)",
                "AHU-Roof",
                "Smart Meter (Floor 5)",
                "Data Center Annex",
                "Taichung Plant",
            ]
        );
        assert_eq!(rows[2].depth, 2);
        assert!(rows[0].expanded);
        assert!(!rows[5].expanded);
    }

    #[test]
    fn collapsed_tree_shows_sites_only() {
        let nodes = topology();
        let rows = visible_rows(&nodes, &HashSet::new());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.node.kind == NodeKind::Site));
    }

    #[test]
    fn expanding_a_child_of_a_collapsed_parent_shows_nothing() {
        let nodes = topology();
        let expanded: HashSet<&str> = ["bldg-2a"].into_iter().collect();
        assert_eq!(visible_rows(&nodes, &expanded).len(), 2);
    }

    #[test]
    fn find_node_searches_every_level() {
        let nodes = topology();
        let eq = find_node(&nodes, "eq-6").unwrap();
        assert_eq!(eq.name, "Air Compressor 01");
        assert_eq!(eq.status, Some(NodeStatus::Offline));
        assert_eq!(find_node(&nodes, DEFAULT_EQUIPMENT).unwrap().kind, NodeKind::Equipment);
        assert!(find_node(&nodes, "eq-99").is_none());
    }

    #[test]
    fn only_equipment_has_status() {
        let nodes = topology();
        let all = visible_rows(&nodes, &["site-1", "site-2", "bldg-1a", "bldg-1b", "bldg-2a"].into_iter().collect());
        assert_eq!(all.len(), 11);
        for row in all {
            assert_eq!(row.node.status.is_some(), row.node.kind == NodeKind::Equipment);
        }
        assert_eq!(status_counts(&nodes), (4, 1, 1));
    }

    #[test]
    fn mappings_bind_known_variables() {
        let maps = field_mappings();
        assert_eq!(maps.len(), 5);
        assert_eq!(maps[3].target.map(|v| v.id), Some("sys_power"));
        assert_eq!(maps.iter().filter(|m| m.target.is_none()).count(), 2);
    }

    #[test]
    fn sync_log_has_every_level() {
        let log = sync_log();
        for level in [LogLevel::Success, LogLevel::Warning, LogLevel::Info, LogLevel::Error] {
            assert!(log.iter().any(|e| e.level == level));
        }
        assert_eq!(serde_json::to_value(&log[4]).unwrap()["level"], "error");
    }
}
