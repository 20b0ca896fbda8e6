/// Builds the analyst prompt around the search stage's JSON.
pub fn build_analysis_prompt(search_data: &str) -> String {
    format!(
        r#"You are an Expert Knowledge Analyst.

Input Data:
{search_data}

Your Mission:
1. **Analyze the Intent**: Is this a technical query, a news update, a historical question, or a product comparison?
2. **Synthesize**: Merge the search results into a cohesive narrative.
3. **Enrich**: Use your internal knowledge to explain *why* this matters, defining technical terms or adding historical context where missing.
4. **Verify**: If sources conflict, note it.

Output strictly valid JSON with these fields:
{{
    "topic_type": "e.g., Technical Comparison / Breaking News / Biography",
    "core_answer": "The main, direct answer to the user's query.",
    "detailed_analysis": "A deep dive into the nuances, facts, and figures found.",
    "expert_context": "Your added internal knowledge that gives the user the 'big picture'."
}}"#
    )
}

/// System message for the structurer.
pub const STRUCTURER_SYSTEM_PROMPT: &str =
    "You are a chameleon editor who adapts format to content.";

/// Builds the structurer prompt around the analyst's JSON.
pub fn build_structure_prompt(analysis_data: &str) -> String {
    format!(
        r#"You are an elite Editor and Content Strategist.

Input Analysis:
{analysis_data}

Your Goal:
Transform the input JSON into the **most effective Markdown format possible** for this specific topic.

**Dynamic Formatting Rules:**
1. **Identify the Content Type**:
   - If it's a **Comparison** (e.g., "X vs Y"), use specific comparison tables.
   - If it's **Code/Technical**, use code blocks and step-by-step implementation guides.
   - If it's **News**, use a "Key Takeaways" style with chronological updates.
   - If it's **History/Biography**, use a narrative flow or timeline.

2. **No Rigid Templates**: Do NOT force sections like "Gap Analysis" or "Executive Summary" unless they actually fit the content.

3. **Style**:
   - Use professional Markdown (H1, H2, Bold, Tables, Blockquotes).
   - Make it readable, engaging, and authoritative.
   - Start with a strong, relevant title.

Return ONLY the Markdown text."#
    )
}
