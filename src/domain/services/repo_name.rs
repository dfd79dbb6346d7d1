// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::site::DEFAULT_SITE_NAME;

/// 仓库名前缀
pub const REPO_PREFIX: &str = "site-";

/// 规整后名称的最大长度，给前缀和 `-NNNN` 后缀留出空间（GitHub 上限 100）
pub const MAX_SANITIZED_LEN: usize = 80;

/// 冲突后缀的取值范围
pub const SUFFIX_MIN: u16 = 1000;
pub const SUFFIX_MAX: u16 = 9999;

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// 将任意站点名规整为合法的仓库名片段
///
/// 转为小写，连续的非字母数字字符折叠为单个 `-`，并去掉首尾的 `-`。
/// 结果为空时返回默认名称。
pub fn sanitize_repo_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let collapsed = NON_ALNUM_RUN.replace_all(&lower, "-");
    let trimmed = collapsed.trim_matches('-');

    let truncated: String = trimmed.chars().take(MAX_SANITIZED_LEN).collect();
    let truncated = truncated.trim_end_matches('-');

    if truncated.is_empty() {
        DEFAULT_SITE_NAME.to_string()
    } else {
        truncated.to_string()
    }
}

/// 基础仓库名 `site-<规整后的名称>`
pub fn base_repo_name(site_name: &str) -> String {
    format!("{}{}", REPO_PREFIX, sanitize_repo_name(site_name))
}

/// 带冲突后缀的仓库名 `<base>-<suffix>`
pub fn with_suffix(base: &str, suffix: u16) -> String {
    format!("{}-{}", base, suffix)
}

/// 随机四位数后缀
pub fn random_suffix() -> u16 {
    rand::random_range(SUFFIX_MIN..=SUFFIX_MAX)
}
