//! 기간 레코드 (종목 × 날짜 한 행).
//!
//! 시뮬레이터는 레코드를 날짜별 배치로 묶어 소비합니다.
//! 배치의 기준 가격은 항상 배치에 처음 나타난 행의 종가입니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// (종목, 날짜) 당 한 행의 가격 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 종목 식별자
    pub stk_id: String,
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: f64,
}

impl PeriodRecord {
    /// 새 레코드를 생성합니다.
    pub fn new(stk_id: impl Into<String>, date: NaiveDate, close: f64) -> Self {
        Self {
            stk_id: stk_id.into(),
            date,
            close,
        }
    }
}

/// 같은 날짜를 공유하는 레코드 묶음.
#[derive(Debug, Clone)]
pub struct DateGroup<'a> {
    /// 배치 날짜
    pub date: NaiveDate,
    /// 입력 순서대로 담긴 레코드 (비어있지 않음)
    pub records: Vec<&'a PeriodRecord>,
}

impl DateGroup<'_> {
    /// 배치의 기준 가격 (첫 번째 레코드의 종가).
    pub fn reference_price(&self) -> f64 {
        self.records[0].close
    }

    /// 배치에 포함된 레코드 수.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 배치가 비어있는지 확인합니다. 생성된 배치는 항상 비어있지 않습니다.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 레코드를 날짜 오름차순 배치로 묶습니다.
///
/// 같은 날짜 안에서는 입력 순서가 유지되므로 각 배치의 첫 레코드는
/// 해당 날짜가 입력에 처음 등장한 행입니다.
pub fn group_by_date(records: &[PeriodRecord]) -> Vec<DateGroup<'_>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&PeriodRecord>> = BTreeMap::new();

    for record in records {
        grouped.entry(record.date).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(date, records)| DateGroup { date, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_group_by_date_orders_dates() {
        let records = vec![
            PeriodRecord::new("A", day(3), 30.0),
            PeriodRecord::new("A", day(1), 10.0),
            PeriodRecord::new("A", day(2), 20.0),
        ];

        let groups = group_by_date(&records);
        let dates: Vec<_> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(groups[0].reference_price(), 10.0);
    }

    #[test]
    fn test_reference_price_is_first_row() {
        let records = vec![
            PeriodRecord::new("B", day(1), 55.0),
            PeriodRecord::new("A", day(1), 11.0),
            PeriodRecord::new("A", day(2), 12.0),
        ];

        let groups = group_by_date(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].reference_price(), 55.0);
        assert_eq!(groups[1].reference_price(), 12.0);
    }

    #[test]
    fn test_group_by_date_empty() {
        assert!(group_by_date(&[]).is_empty());
    }
}
