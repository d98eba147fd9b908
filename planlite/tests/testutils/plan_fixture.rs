//! Plan fixture for PlanLite integration tests
//!
//! The fixture mirrors what a caller holds after running an analyzed explain
//! on a query with one CTE: the root tree plus a pre-extracted CTE forest.
//! Node ids are assigned here the way an external sequencing component would,
//! since the analyzer never invents identifiers.

use planlite::{Plan, PlanNode};

/// Explain output for a query joining a CTE against an accounts table.
///
/// Tree shape:
///
/// ```text
/// Sort
/// └── Hash Join
///     ├── CTE Scan (recent)
///     └── Hash
///         └── Seq Scan (accounts)
/// ctes: Aggregate            <- "CTE recent"
///       └── Seq Scan (orders)
/// ```
pub const FIXTURE_EXPLAIN_JSON: &str = r#"{
    "Plan": {
        "Node Type": "Sort",
        "Sort Key": ["lower(a.name)", "recent.total DESC"],
        "Plan Rows": 80,
        "Actual Rows": 100,
        "Total Cost": 120.1,
        "Actual Total Time": 8.5,
        "Actual Loops": 1,
        "Plans": [
            {
                "Node Type": "Hash Join",
                "Join Type": "Inner",
                "Hash Cond": "(recent.account_id = a.id)",
                "Plan Rows": 80,
                "Actual Rows": 100,
                "Total Cost": 95.3,
                "Actual Total Time": 7.9,
                "Actual Loops": 1,
                "Plans": [
                    {
                        "Node Type": "CTE Scan",
                        "CTE Name": "recent",
                        "Alias": "recent",
                        "Plan Rows": 200,
                        "Actual Rows": 150,
                        "Total Cost": 40.0,
                        "Actual Total Time": 3.2,
                        "Actual Loops": 1
                    },
                    {
                        "Node Type": "Hash",
                        "Plan Rows": 5000,
                        "Actual Rows": 5000,
                        "Total Cost": 35.0,
                        "Actual Total Time": 2.1,
                        "Actual Loops": 1,
                        "Plans": [
                            {
                                "Node Type": "Seq Scan",
                                "Relation Name": "accounts",
                                "Alias": "a",
                                "Plan Rows": 4800,
                                "Actual Rows": 5000,
                                "Total Cost": 31.4,
                                "Actual Total Time": 1.8,
                                "Actual Loops": 1
                            }
                        ]
                    }
                ]
            }
        ]
    },
    "ctes": [
        {
            "Node Type": "Aggregate",
            "Subplan Name": "CTE recent",
            "Plan Rows": 100,
            "Actual Rows": 150,
            "Total Cost": 55.8,
            "Actual Total Time": 4.4,
            "Actual Loops": 1,
            "Plans": [
                {
                    "Node Type": "Seq Scan",
                    "Relation Name": "orders",
                    "Alias": "o",
                    "Plan Rows": 6000,
                    "Actual Rows": 12000,
                    "Total Cost": 44.9,
                    "Actual Total Time": 3.0,
                    "Actual Loops": 1
                }
            ]
        }
    ],
    "Planning Time": 0.21,
    "Execution Time": 9.1
}"#;

pub const FIXTURE_QUERY: &str =
    "WITH recent AS (SELECT account_id, sum(total) AS total FROM orders GROUP BY account_id) \
     SELECT a.name, recent.total FROM recent JOIN accounts a ON recent.account_id = a.id \
     ORDER BY lower(a.name), recent.total DESC";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Materialize and analyze the fixture plan, with node ids assigned.
pub fn sample_plan() -> Plan {
    init_logging();
    let mut plan = Plan::from_json("fixture plan", FIXTURE_EXPLAIN_JSON, FIXTURE_QUERY)
        .expect("fixture should materialize");
    assign_node_ids(&mut plan);
    plan
}

/// Assign sequential ids over the root tree and then the CTE forest, the way
/// the caller's sequencing component does before handing a plan out.
pub fn assign_node_ids(plan: &mut Plan) {
    let mut next = 1;
    assign_subtree(&mut plan.content.root, &mut next);
    for cte in &mut plan.content.ctes {
        assign_subtree(cte, &mut next);
    }
}

fn assign_subtree(node: &mut PlanNode, next: &mut i64) {
    node.node_id = *next;
    *next += 1;
    for child in &mut node.children {
        assign_subtree(child, next);
    }
}

/// Visit every node of the plan, root tree first, then the CTE forest.
pub fn for_each_node<'a>(plan: &'a Plan, visit: &mut impl FnMut(&'a PlanNode)) {
    visit_subtree(&plan.content.root, visit);
    for cte in &plan.content.ctes {
        visit_subtree(cte, visit);
    }
}

fn visit_subtree<'a>(node: &'a PlanNode, visit: &mut impl FnMut(&'a PlanNode)) {
    visit(node);
    for child in &node.children {
        visit_subtree(child, visit);
    }
}

/// Equality check for derived floats that went through subtraction.
pub fn assert_close(actual: f64, expected: f64, label: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{} should be {}, got {}",
        label,
        expected,
        actual
    );
}
