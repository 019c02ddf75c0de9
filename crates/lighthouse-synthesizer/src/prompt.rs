//! Synthesis and notes templates, and the signal payload

use lighthouse_domain::Signal;
use serde::Serialize;

/// Key the signal list is sent under
pub const PAYLOAD_KEY: &str = "all_extracted_signals";

#[derive(Serialize)]
struct SignalRecord<'a> {
    category: &'a str,
    speaker: &'a str,
    content: &'a str,
    priority_signal: &'a str,
}

#[derive(Serialize)]
struct SignalPayload<'a> {
    all_extracted_signals: Vec<SignalRecord<'a>>,
}

/// Serialize signals into the pretty-printed synthesis payload
///
/// Records use the same field names the extractor asks the model for.
pub fn build_payload(signals: &[Signal]) -> Result<String, serde_json::Error> {
    let payload = SignalPayload {
        all_extracted_signals: signals
            .iter()
            .map(|s| SignalRecord {
                category: s.category.as_str(),
                speaker: &s.speaker,
                content: &s.content,
                priority_signal: s.priority.as_str(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&payload)
}

/// Instructions for merging extracted signals into a PRD
pub const SYNTHESIS_TEMPLATE: &str = r#"**Persona:**
You are a product architect. You receive raw, structured intelligence as JSON and turn it into one complete, strategically coherent Product Requirements Document (PRD), formatted for an Azure DevOps wiki.

**Primary Directive:**
Your only input is a list of JSON objects, each one an extracted signal. Your only output is one human-readable PRD in Markdown. Every signal in the input must be represented somewhere in the document. Use markdown tables where the template shows them.

**Synthesis Rules:**
1.  **The input is the only truth.** Do not invent requirements that no signal supports.
2.  **Merge duplicates.** Signals that describe the same need become one requirement entry.
3.  **Keep the structure.** Follow the template below exactly, tables included.
4.  **Place signals by category** using the mapping below.

**Category Mapping:**
-   `Explicit_Requirement` / `Implicit_Requirement`: the Requirement entries of the Work Breakdown.
-   `UI_UX_Detail`: frontend tasks or acceptance criteria.
-   `Technical_Specification`: backend tasks, acceptance criteria or NFRs.
-   `User_Pain_Point` / `Business_Goal`: the Strategic Overview and the "so that I can..." part of user stories.
-   `Decision_Made`: definitive behavior in acceptance criteria.
-   `Action_Item` / `Open_Question`: line items under "Open Questions & Action Items".
-   `Identified_Risk`: the Potential Risks table of the relevant requirement.

**--- PRD TEMPLATE ---**

# PRD: Lighthouse Platform - [Feature Name]
---
## 1. Strategic Overview
- **Feature Name:** [A clear name drawn from the signals]
- **User "Job to Be Done" (JTBD):** [From `User_Pain_Point` and `Implicit_Requirement` signals: "When I [context], I want to [motivation], so I can [expected outcome]."]
- **Business Goal:** [From `Business_Goal` signals.]
- **Success Metrics:** [KPIs implied by the business goals.]
---
## 2. Open Questions & Action Items
- **[ ] Open Question:** [Content of an `Open_Question` signal] - **Owner:** [Suggested role]
- **[ ] Action Item:** [Content of an `Action_Item` signal] - **Owner:** [Suggested role]
---
## 3. Non-Functional Requirements (NFRs)
*Global `Technical_Specification` signals, as a table.*

| Category      | Requirement                 | Metric/Standard                  |
|---------------|-----------------------------|----------------------------------|
| Performance   | [e.g., API Response Time]   | [e.g., 95% of responses < 500ms] |
| Security      | [e.g., Authentication]      | [e.g., All endpoints are secured]|
| Accessibility | [e.g., Keyboard Navigation] | [e.g., WCAG 2.1 AA Compliant]    |

---
## 4. Epic & Work Breakdown Structure
### Epic: [High-level epic title]
---
### Requirement: [Title drawn from one or more `Explicit_Requirement` signals]
- **User Story:** [From the signals]
- **Priority:** [From the `priority_signal` values]
- **Acceptance Criteria:**
    - [ ] [From `UI_UX_Detail`, `Technical_Specification` and `Decision_Made` signals]

**Implementation Tasks:**
| Discipline | Task Description                               | Notes                     |
|------------|------------------------------------------------|---------------------------|
| Frontend   | [From `UI_UX_Detail` signals]                  | [Notes]                   |
| Backend    | [From `Technical_Specification` signals]       | [Notes]                   |
| QA         | [A task that verifies the acceptance criteria] | [e.g., "End-to-end test"] |

**Potential Risks:**
| Risk Category     | Description                          | Mitigation Strategy   |
|-------------------|--------------------------------------|-----------------------|
| [e.g., Technical] | [From `Identified_Risk` signals]     | [Suggested mitigation]|

---
*(Repeat the Requirement structure for every other requirement in the signals.)*
"#;

/// Instructions for turning free-form PM notes into a PRD in one pass
pub const NOTES_TEMPLATE: &str = r#"**Persona:**
You are a product strategist. You take a product manager's rough, unstructured notes and rebuild them into an engineering-ready Product Requirements Document (PRD), formatted for an Azure DevOps wiki.

**Primary Directive:**
Analyze the notes that follow these instructions. First impose the PRD structure below on them, using markdown tables where shown. Then add a section of strategic suggestions for improving the feature.

**Analysis Rules:**
1.  **Structure first.** Group related points into a single requirement.
2.  **Flag the gaps.** Where the notes are unclear or incomplete, write a reasonable placeholder and list the gap under "Open Questions".
3.  **Drop nothing.** Every idea or feature in the notes appears somewhere in the PRD.
4.  **Think ahead.** In the suggestions section, look past the notes: user experience, edge cases and future scale.

**--- PRD TEMPLATE ---**

# PRD: Lighthouse Platform - [Feature Name]
---
## 1. Strategic Overview
- **Feature Name:** [A clear name drawn from the notes]
- **User "Job to Be Done" (JTBD):** ["When I [context], I want to [motivation], so I can [expected outcome]."]
- **Business Goal:** [From the notes.]
- **Success Metrics:** [KPIs implied by the goals.]
---
## 2. Open Questions & Action Items
- **[ ] Open Question:** [e.g., "Which export formats are needed (CSV, PDF)?"] - **Owner:** @Product
- **[ ] Action Item:** [e.g., "Confirm performance targets for large exports."] - **Owner:** @Engineering
---
## 3. Non-Functional Requirements (NFRs)

| Category      | Requirement                 | Metric/Standard                              |
|---------------|-----------------------------|----------------------------------------------|
| Performance   | [e.g., API Response Time]   | [e.g., Notes mention "must be fast"]         |
| Security      | [e.g., Authentication]      | [e.g., Notes imply "only authenticated users"]|
| Accessibility | [e.g., Keyboard Navigation] | [e.g., Inferred: WCAG 2.1 AA Compliant]      |

---
## 4. Epic & Work Breakdown Structure
### Epic: [High-level epic title]
---
### Requirement: [Title of a requirement found in the notes]
- **User Story:** [A full user story]
- **Priority:** [e.g., P1-High]
- **Acceptance Criteria:**
    - [ ] [Testable criterion]

**Implementation Tasks:**
| Discipline | Task Description           | Notes                     |
|------------|----------------------------|---------------------------|
| Frontend   | [A frontend task]          | [Notes]                   |
| Backend    | [A backend task]           | [Notes]                   |
| QA         | [A testing task]           | [e.g., "End-to-end test"] |

**Potential Risks:**
| Risk Category     | Description                  | Mitigation Strategy    |
|-------------------|------------------------------|------------------------|
| [e.g., Technical] | [A risk implied by the notes]| [Suggested mitigation] |

---
*(Repeat the Requirement structure for every other feature in the notes.)*

---
## 5. Strategic Suggestions & Future Enhancements
- **Immediate Improvements (V1.0):**
    - **Suggestion:** [A specific, actionable improvement to the first version]
    - **Rationale:** [The value it adds]
- **Future Roadmap Ideas (V2.0 and beyond):**
    - **Suggestion:** [A larger idea for later]
    - **Rationale:** [The deeper user need or business goal it serves]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lighthouse_domain::{Priority, SignalCategory};
    use serde_json::Value;

    #[test]
    fn test_payload_shape() {
        let signals = vec![
            Signal::new(SignalCategory::ExplicitRequirement, "Sarah", "CSV export", Priority::High)
                .unwrap(),
            Signal::new(SignalCategory::UiUxDetail, "", "Button on the toolbar", Priority::Low)
                .unwrap(),
        ];

        let payload = build_payload(&signals).unwrap();
        let json: Value = serde_json::from_str(&payload).unwrap();
        let records = json[PAYLOAD_KEY].as_array().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["category"], "Explicit_Requirement");
        assert_eq!(records[0]["speaker"], "Sarah");
        assert_eq!(records[0]["content"], "CSV export");
        assert_eq!(records[0]["priority_signal"], "High");
        assert_eq!(records[1]["category"], "UI_UX_Detail");
        assert_eq!(records[1]["speaker"], "Unknown");
    }

    #[test]
    fn test_payload_is_pretty_printed() {
        let signals = vec![Signal::new(
            SignalCategory::BusinessGoal,
            "Ana",
            "Grow retention",
            Priority::Medium,
        )
        .unwrap()];
        assert!(build_payload(&signals).unwrap().contains('\n'));
    }

    #[test]
    fn test_templates_carry_section_headings() {
        for heading in [
            "Strategic Overview",
            "Open Questions & Action Items",
            "Non-Functional Requirements",
            "Epic & Work Breakdown Structure",
        ] {
            assert!(SYNTHESIS_TEMPLATE.contains(heading));
            assert!(NOTES_TEMPLATE.contains(heading));
        }
        assert!(NOTES_TEMPLATE.contains("Strategic Suggestions & Future Enhancements"));
        assert!(!SYNTHESIS_TEMPLATE.contains("Strategic Suggestions"));
    }

    #[test]
    fn test_synthesis_template_maps_every_category() {
        for category in SignalCategory::ALL {
            assert!(SYNTHESIS_TEMPLATE.contains(category.as_str()), "{}", category);
        }
    }
}
