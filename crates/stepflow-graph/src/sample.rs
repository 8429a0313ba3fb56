//! Built-in "Maven Flow" walkthrough graph
//!
//! Sixteen steps from `/flow start` to `FLOW_COMPLETE`, including the
//! `12 -> 4` loop back for remaining stories.

use crate::document::{EdgeDef, NoteDef, StepDef};
use crate::geometry::Handle::{Bottom, Left, Right, Top};
use crate::spec::GraphSpec;
use crate::theme::{ColorTag, NoteTint, Phase};
use once_cell::sync::Lazy;
use std::sync::Arc;

static SHARED: Lazy<Arc<GraphSpec>> = Lazy::new(|| Arc::new(maven_flow()));

/// Process-wide instance of the sample graph
#[must_use]
pub fn shared() -> Arc<GraphSpec> {
    Arc::clone(&SHARED)
}

/// Build the sample graph
///
/// # Panics
/// Never in practice; the definition below has unique ids.
#[must_use]
pub fn maven_flow() -> GraphSpec {
    GraphSpec::builder()
        .step(StepDef::new("1", "Run /flow start", Phase::Entry).description("User initiates Maven Flow").at(50.0, 20.0))
        .step(StepDef::new("2", "Load PRD", Phase::Setup).description("Read docs/prd.json for stories").at(50.0, 130.0))
        .step(StepDef::new("3", "Read Progress", Phase::Setup).description("Load docs/progress.txt for patterns").at(50.0, 240.0))
        .step(
            StepDef::new("4", "flow-iteration agent (🟡)", Phase::Coordination)
                .description("Main coordinator picks story")
                .agent("flow-iteration")
                .at(50.0, 360.0),
        )
        .step(
            StepDef::new("5a", "development-agent (🟢)", Phase::Agents)
                .description("Steps 1,2,7,9: Foundation, pnpm, data, MCP")
                .agent("development-agent")
                .color(ColorTag::Green)
                .at(400.0, 320.0),
        )
        .step(
            StepDef::new("5b", "refactor-agent (🔵)", Phase::Agents)
                .description("Steps 3,4,6: Structure, modularize, UI")
                .agent("refactor-agent")
                .color(ColorTag::Blue)
                .at(400.0, 420.0),
        )
        .step(
            StepDef::new("5c", "quality-agent (🟣)", Phase::Agents)
                .description("Step 5: Type safety, @ aliases, NO gradients")
                .agent("quality-agent")
                .color(ColorTag::Purple)
                .at(400.0, 520.0),
        )
        .step(
            StepDef::new("5d", "security-agent (🔴)", Phase::Agents)
                .description("Steps 8,10: Auth flow, security audit")
                .agent("security-agent")
                .color(ColorTag::Red)
                .at(400.0, 620.0),
        )
        .step(StepDef::new("6", "Implement Story", Phase::Loop).description("Agents coordinate to implement").at(800.0, 320.0))
        .step(StepDef::new("7", "Quality Hooks", Phase::Loop).description("PostToolUse: Check any types, gradients").at(800.0, 430.0))
        .step(StepDef::new("8", "Stop Hook", Phase::Loop).description("Pre-commit: Comprehensive check").at(800.0, 540.0))
        .step(StepDef::new("9", "Commit Changes", Phase::Loop).description("feat: [Story ID] - [Title]").at(800.0, 650.0))
        .step(StepDef::new("10", "Update PRD", Phase::Loop).description("Set passes: true in docs/prd.json").at(800.0, 760.0))
        .step(StepDef::new("11", "Log Progress", Phase::Loop).description("Append learnings to docs/progress.txt").at(800.0, 870.0))
        .step(StepDef::new("12", "All stories complete?", Phase::Decision).description("Check if all passes: true").at(400.0, 870.0))
        .step(StepDef::new("13", "FLOW_COMPLETE", Phase::Done).description("All stories implemented").at(400.0, 990.0))
        // setup chain
        .edge(EdgeDef::new("1", "2").handles(Bottom, Top))
        .edge(EdgeDef::new("2", "3").handles(Bottom, Top))
        .edge(EdgeDef::new("3", "4").handles(Bottom, Top))
        // fan out to agents
        .edge(EdgeDef::new("4", "5a").handles(Right, Left))
        .edge(EdgeDef::new("4", "5b").handles(Right, Left))
        .edge(EdgeDef::new("4", "5c").handles(Right, Left))
        .edge(EdgeDef::new("4", "5d").handles(Right, Left))
        // fan in to implementation
        .edge(EdgeDef::new("5a", "6").handles(Right, Left))
        .edge(EdgeDef::new("5b", "6").handles(Right, Left))
        .edge(EdgeDef::new("5c", "6").handles(Right, Left))
        .edge(EdgeDef::new("5d", "6").handles(Right, Left))
        .edge(EdgeDef::new("6", "7").handles(Bottom, Top))
        .edge(EdgeDef::new("7", "8").handles(Bottom, Top))
        .edge(EdgeDef::new("8", "9").handles(Bottom, Top))
        .edge(EdgeDef::new("9", "10").handles(Bottom, Top))
        .edge(EdgeDef::new("10", "11").handles(Bottom, Top))
        .edge(EdgeDef::new("11", "12").handles(Bottom, Left))
        .edge(EdgeDef::new("12", "4").handles(Top, Bottom).label("More stories"))
        .edge(EdgeDef::new("12", "13").handles(Bottom, Top).label("All done"))
        .note(NoteDef::new("note-prd", 2, NoteTint::Amber, PRD_NOTE).at(550.0, 80.0))
        .note(NoteDef::new("note-agents", 5, NoteTint::Green, AGENTS_NOTE).at(600.0, 330.0))
        .note(NoteDef::new("note-hooks", 7, NoteTint::Pink, HOOKS_NOTE).at(850.0, 550.0))
        .note(NoteDef::new("note-architecture", 6, NoteTint::Violet, ARCHITECTURE_NOTE).at(100.0, 500.0))
        .build()
        .expect("built-in sample graph has unique ids")
}

const PRD_NOTE: &str = r#"docs/prd.json
{
  "projectName": "My App",
  "branchName": "feature/auth",
  "stories": [
    {
      "id": "US-001",
      "title": "Add user authentication",
      "priority": 1,
      "passes": false,
      "acceptanceCriteria": [...]
    }
  ]
}"#;

const AGENTS_NOTE: &str = "Maven 10-Step Workflow:

🟢 development-agent
• Step 1: Import UI/create from scratch
• Step 2: npm → pnpm
• Step 7: Data layer
• Step 9: MCP integrations

🔵 refactor-agent
• Step 3: Feature-based structure
• Step 4: Modularize components
• Step 6: Centralize UI components

🟣 quality-agent
• Step 5: Type safety, @ aliases
• ZERO TOLERANCE: No 'any', no gradients

🔴 security-agent
• Step 8: Firebase + Supabase auth
• Step 10: Security & error handling";

const HOOKS_NOTE: &str = "Automated Quality Hooks:

PostToolUse Hook:
• Checks after every Write/Edit
• 🚨 BLOCKS: 'any' types
• 🚨 BLOCKS: Gradients
• Flags: Relative imports
• Flags: Large components

Stop Hook:
• Runs before completing work
• Comprehensive codebase scan
• Blocks commit on violations
• Creates fix agent tasks";

const ARCHITECTURE_NOTE: &str = r#"Feature-Based Architecture:

src/
├── app/                    # Entry points
├── features/               # Isolated modules
│   ├── auth/              # Cannot import from
│   ├── dashboard/         # other features
│   └── [feature-name]/
├── shared/                # Shared code
│   ├── ui/                # @shared/ui
│   ├── api/               # Backend clients
│   └── utils/
└── [type: "app"]

Rules:
• Features → Cannot import from other features
• Use @shared/*, @features/* aliases
• NO relative imports
• NO gradients (solid colors only)"#;
