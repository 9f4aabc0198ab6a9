//! 规格枚举的统一契约

/// 规格属性枚举
///
/// 成员以规范字符串形式参与编码与比较，从不使用序号。
pub trait SpecEnum: Copy + Eq + 'static {
    /// 全部成员（声明顺序）
    const ALL: &'static [Self];

    /// 全部成员的规范字符串（与 `ALL` 一一对应）
    const NAMES: &'static [&'static str];

    /// 规范字符串形式
    fn as_str(&self) -> &'static str;

    /// 严格解析，大小写敏感，不匹配任何成员时返回 None
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == value)
    }
}

#[cfg(test)]
pub(crate) fn assert_names_consistent<E: SpecEnum + std::fmt::Debug>() {
    assert_eq!(E::ALL.len(), E::NAMES.len());
    for (member, name) in E::ALL.iter().zip(E::NAMES) {
        assert_eq!(member.as_str(), *name);
        assert_eq!(E::parse(name), Some(*member));
    }
}
