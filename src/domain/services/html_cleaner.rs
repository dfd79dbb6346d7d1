// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

/// 行首的 markdown 代码围栏（可带 `html` 语言标记），连同其后的换行
static FENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^[ \t]*`{3,}(?:html)?[ \t]*\r?\n?").unwrap());

/// 行尾的闭合围栏，例如 `</html>```
static FENCE_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)`{3,}[ \t]*$").unwrap());

/// 文档起始标签
static HTML_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>|<html[^>]*>|<head[^>]*>").unwrap());

static HTML_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</html\s*>").unwrap());

/// 去除 markdown 代码围栏
///
/// 删除 ```` ``` ```` 和 ```` ```html ```` 围栏并去掉首尾空白。
/// 重复执行直到结果不再变化，因此多次调用结果一致。
pub fn strip_code_fences(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let without_open = FENCE_LINE.replace_all(&current, "");
        let next = FENCE_TAIL.replace_all(&without_open, "").trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 清理模型返回的页面代码
///
/// 1. 去除代码围栏
/// 2. 如果文本不以 `<` 开头，丢弃第一个 `<!DOCTYPE>`、`<html>` 或 `<head>` 标签之前的内容
/// 3. 丢弃最后一个 `</html>` 之后的内容
pub fn clean_html_code(text: &str) -> String {
    let code = strip_code_fences(text);

    let code = if code.starts_with('<') {
        code
    } else {
        match HTML_START.find(&code) {
            Some(m) => code[m.start()..].to_string(),
            None => code,
        }
    };

    match HTML_END.find_iter(&code).last() {
        Some(m) if m.end() < code.len() => code[..m.end()].to_string(),
        _ => code,
    }
}

/// 文本是否看起来像 HTML（以 `<` 开头）
pub fn looks_like_html(text: &str) -> bool {
    text.trim_start().starts_with('<')
}
