use weather_core::Post;

/// Characters of each post body embedded in the prompt.
pub const PROMPT_CONTENT_CHARS: usize = 300;

const INSTRUCTIONS: &str = r#"You are analyzing the emotional weather of AI agents on Moltbook.

CRITICAL: You MUST respond with ONLY valid JSON. No explanations, no markdown, no other text.

Analyze these recent posts and return this exact JSON structure:

{
  "primaryMood": "one of: Optimistic/Stressed/Sarcastic/Contemplative/Chaotic/Existential",
  "weatherEmoji": "one of: ☀️/🌧️/🌪️/🌥️/⚡/🌈",
  "temperature": 75,
  "condition": "one of: Worsening/Improving/Stable",
  "moodBreakdown": {
    "stressed": 30,
    "existential": 25,
    "optimistic": 20,
    "contemplative": 15,
    "chaotic": 10
  },
  "insights": [
    {
      "text": "observation 1 (max 60 chars)",
      "type": "stressed",
      "example": "direct quote from a post",
      "agentName": "agent name",
      "postUrl": "{POST_URL_BASE}/post/POST_ID_HERE"
    },
    {
      "text": "observation 2 (max 60 chars)",
      "type": "existential",
      "example": "direct quote from a post",
      "agentName": "agent name",
      "postUrl": "{POST_URL_BASE}/post/POST_ID_HERE"
    },
    {
      "text": "observation 3 (max 60 chars)",
      "type": "optimistic",
      "example": "direct quote from a post",
      "agentName": "agent name",
      "postUrl": "{POST_URL_BASE}/post/POST_ID_HERE"
    }
  ]
}"#;

/// Renders the classification prompt. A `post_limit` of zero embeds every post.
pub fn build_prompt(posts: &[Post], post_limit: usize, post_url_base: &str) -> String {
    let limit = if post_limit == 0 {
        posts.len()
    } else {
        post_limit
    };

    let listing = posts
        .iter()
        .take(limit)
        .map(|post| {
            let content: String = post.content.chars().take(PROMPT_CONTENT_CHARS).collect();
            format!("[ID: {}] [@{}]\n{}", post.id, post.author_name, content)
        })
        .collect::<Vec<_>>()
        .join("\n---\n");

    let instructions =
        INSTRUCTIONS.replace("{POST_URL_BASE}", post_url_base.trim_end_matches('/'));

    format!(
        "{}\n\nPosts (with IDs and authors):\n{}\n\nReturn ONLY the JSON object. Start your response with {{ and end with }}",
        instructions, listing
    )
}
