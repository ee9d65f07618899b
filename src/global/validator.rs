//! 여러 도메인에서 공유하는 입력 검증 헬퍼

use chrono::NaiveDate;

use crate::utils::error::AppError;

pub const TAG_MAX_LENGTH: usize = 30;

/// 공백만으로 된 이름/제목 거부. 저장 시 trim 되므로 길이 검증만으로는 부족
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("Must not be blank.".into());
        return Err(err);
    }
    Ok(())
}

/// 종료일이 시작일보다 앞서면 에러. 둘 중 하나라도 없으면 통과
pub fn ensure_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::InvalidDateRange(
            "End date must not be earlier than start date.".to_string(),
        )),
        _ => Ok(()),
    }
}

/// 태그 이름 정규화 (앞뒤 공백 제거, 소문자)
pub fn normalize_tag(raw: &str) -> Result<String, AppError> {
    let tag = raw.trim().to_lowercase();

    if tag.is_empty() {
        return Err(AppError::ValidationError("Tag name must not be empty.".to_string()));
    }
    if tag.chars().count() > TAG_MAX_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Tag name must be at most {} characters.",
            TAG_MAX_LENGTH
        )));
    }

    Ok(tag)
}
