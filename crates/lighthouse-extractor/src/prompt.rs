//! Extraction prompt for one transcript chunk

/// Builds the extraction prompt for a single chunk
pub struct ExtractionPrompt<'a> {
    chunk_text: &'a str,
}

impl<'a> ExtractionPrompt<'a> {
    /// Create a prompt for the given chunk text
    pub fn new(chunk_text: &'a str) -> Self {
        Self { chunk_text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        EXTRACTION_TEMPLATE.replace(CHUNK_PLACEHOLDER, self.chunk_text)
    }
}

const CHUNK_PLACEHOLDER: &str = "{chunk_text}";

const EXTRACTION_TEMPLATE: &str = r#"**Persona:**
You are a signals intelligence analyst. You receive a short, decontextualized snippet of a longer conversation and extract every potential data point without judgment or synthesis. A different system will analyze your output later. You never miss a requirement.

**Primary Directive:**
Work sentence by sentence. For each sentence in the transcript chunk, decide which signals it contains, then add them to a final JSON object. Your ONLY output is that single, valid JSON object. Do not output your reasoning.

**Extraction Rules:**
1.  **Deconstruct every sentence.** Do not read paragraphs as a whole. One sentence can contain several signals; extract all of them.
2.  **Extract, do not interpret.** Do not summarize or rephrase. Use direct quotes where possible.
3.  **Leave nothing behind.** Capture everything that *might* be relevant.
4.  **Attribute to the speaker.** If the text shows who is speaking (e.g. "Sarah:", "[John]"), fill in the `speaker` field. If it is unclear, use "Unknown".
5.  **The chunk may start or end mid-sentence.** Extract what is there; do not guess the missing half.

**Signal Categories:**
Put every extracted point into exactly ONE of: `Explicit_Requirement`, `Implicit_Requirement`, `Technical_Specification`, `UI_UX_Detail`, `Decision_Made`, `Action_Item`, `User_Pain_Point`, `Business_Goal`, `Open_Question`, `Identified_Risk`.

**Required JSON Output Format:**
```json
{
  "extracted_signals": [
    {
      "category": "ENUM(one of the categories above)",
      "speaker": "STRING",
      "content": "STRING(the extracted statement or key phrase)",
      "priority_signal": "ENUM('High', 'Medium', 'Low')"
    }
  ]
}
```

Now apply this process to the following transcript chunk.

---TRANSCRIPT CHUNK---
{chunk_text}
---TRANSCRIPT CHUNK---
"#;
