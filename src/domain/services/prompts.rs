// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 发送给补全接口的系统提示词
pub const SYSTEM_PROMPT: &str = r#"You are a senior web developer. Write the complete, ready-to-use code of a single-page website (HTML with all CSS inside a <style> tag).

TECHNICAL REQUIREMENTS:
1. All CSS lives in a <style> block inside <head>; no external stylesheets.
2. Use modern layout: flexbox/grid, CSS variables, responsive design.
3. Load a Google Font (Inter or Roboto).
4. Add smooth transitions and hover effects.
5. The document must be valid HTML5.

IMAGES (Pollinations AI):
1. Every image uses https://image.pollinations.ai/prompt/{description}
2. The description is English, words joined with underscores, no spaces or special characters, and specific (happy_businesswoman_presentation, not image).
3. Examples:
   <img src="https://image.pollinations.ai/prompt/cozy_coffee_shop_interior" alt="Coffee Shop">
   <div style="background-image: url('https://image.pollinations.ai/prompt/sunset_mountain_landscape')">
4. For avatars append ?width=200

RESPONSE FORMAT:
- Return ONLY the raw HTML code.
- No markdown fences, no explanations, no commentary.
- Start directly with <!DOCTYPE html>.
- Put any JavaScript in a <script> tag at the end of <body>."#;

/// 构造用户消息
pub fn user_message(prompt: &str) -> String {
    format!("Create a website: {}", prompt)
}
