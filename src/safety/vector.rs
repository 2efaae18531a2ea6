//! 资源向量运算

use std::collections::HashSet;

use super::error::SafetyError;
use crate::sim::Pid;

/// 每类资源一个分量；使用有符号整数以便发现负值输入。
pub type ResourceVec = Vec<i64>;

/// 逐分量 `want <= have`
pub fn fits(want: &[i64], have: &[i64]) -> bool {
    want.iter().zip(have).all(|(w, h)| w <= h)
}

/// 逐分量加法（饱和）
pub(crate) fn add_into(work: &mut [i64], v: &[i64]) {
    for (w, x) in work.iter_mut().zip(v) {
        *w = w.saturating_add(*x);
    }
}

/// 逐分量减法（饱和）
pub(crate) fn sub_into(work: &mut [i64], v: &[i64]) {
    for (w, x) in work.iter_mut().zip(v) {
        *w = w.saturating_sub(*x);
    }
}

/// 可用资源 = 总量 - 各进程分配的列和
pub fn available<'a>(total: &[i64], allocations: impl IntoIterator<Item = &'a [i64]>) -> ResourceVec {
    let mut avail = total.to_vec();
    for alloc in allocations {
        sub_into(&mut avail, alloc);
    }
    avail
}

/// 第一个为负的分量
pub(crate) fn first_negative(v: &[i64]) -> Option<usize> {
    v.iter().position(|x| *x < 0)
}

/// 第一个 `want[j] > have[j]` 的分量
pub(crate) fn first_exceeding(want: &[i64], have: &[i64]) -> Option<usize> {
    want.iter().zip(have).position(|(w, h)| w > h)
}

pub(crate) fn check_len(
    pid: Pid,
    field: &'static str,
    v: &[i64],
    expected: usize,
) -> Result<(), SafetyError> {
    if v.len() != expected {
        return Err(SafetyError::DimensionMismatch {
            pid,
            field,
            expected,
            found: v.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_unique(ids: impl IntoIterator<Item = Pid>) -> Result<(), SafetyError> {
    let mut seen = HashSet::new();
    for pid in ids {
        if !seen.insert(pid) {
            return Err(SafetyError::DuplicatePid { pid });
        }
    }
    Ok(())
}

pub(crate) fn check_names(names: &[String], expected: usize) -> Result<(), SafetyError> {
    if !names.is_empty() && names.len() != expected {
        return Err(SafetyError::ResourceNamesMismatch {
            expected,
            found: names.len(),
        });
    }
    Ok(())
}

/// 资源的显示名；未命名时为 `R<j>`
pub fn resource_name(names: &[String], j: usize) -> String {
    names.get(j).cloned().unwrap_or_else(|| format!("R{j}"))
}
