//! 요청/응답 DTO에서 같이 쓰는 serde 헬퍼

use serde::{Deserialize, Deserializer};

/// PATCH 필드용: 키 없음 → `None`, `null` → `Some(None)`, 값 → `Some(Some(v))`
///
/// `#[serde(default, deserialize_with = "double_option")]`와 함께 사용합니다.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 명시적인 `null`도 키가 없을 때와 같이 기본값으로 처리
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
