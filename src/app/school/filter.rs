//! 列表搜索过滤

use super::model::School;

/// 只有空字符串视为没有搜索，空格也是搜索内容的一部分
pub fn normalize_term(term: Option<&str>) -> Option<&str> {
    term.filter(|t| !t.is_empty())
}

/// 名称、城市、省/州任一字段包含搜索词（不区分大小写）即匹配
pub fn matches(school: &School, term: &str) -> bool {
    let needle = term.to_lowercase();
    [&school.name, &school.city, &school.state]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// 按搜索词过滤，保持原有顺序
pub fn filter_schools<'a>(schools: &'a [School], term: Option<&str>) -> Vec<&'a School> {
    match normalize_term(term) {
        Some(term) => schools.iter().filter(|s| matches(s, term)).collect(),
        None => schools.iter().collect(),
    }
}
