// ==========================================
// 燃料月报汇总 - 统计原语
// ==========================================
// 职责: 加权平均 / 求和 / 均值 / 极值 / 有序分组
// 缺失值口径:
// - 求和跳过缺失值，全部缺失时为 0
// - 均值/极值全部缺失时为 NaN
// - 加权平均 = Σ(值×权重) / Σ权重；分子只计值与权重均存在的行，
//   分母只计权重存在的行；权重和为 0 时结果为 NaN（写出为空单元格）
// ==========================================

use std::collections::BTreeMap;

/// 加权平均
pub fn weighted_average<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (value, weight) in pairs {
        if let Some(w) = weight {
            denominator += w;
            if let Some(v) = value {
                numerator += v * w;
            }
        }
    }
    if denominator == 0.0 {
        return f64::NAN;
    }
    numerator / denominator
}

pub fn sum<I: IntoIterator<Item = Option<f64>>>(values: I) -> f64 {
    values.into_iter().flatten().sum()
}

pub fn mean<I: IntoIterator<Item = Option<f64>>>(values: I) -> f64 {
    let (total, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(t, c), v| (t + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        total / count as f64
    }
}

pub fn max<I: IntoIterator<Item = Option<f64>>>(values: I) -> f64 {
    values.into_iter().flatten().fold(f64::NAN, f64::max)
}

pub fn min<I: IntoIterator<Item = Option<f64>>>(values: I) -> f64 {
    values.into_iter().flatten().fold(f64::NAN, f64::min)
}

/// 按键分组（键有序；键为 None 的行不进入任何分组）
pub fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        if let Some(k) = key(item) {
            groups.entry(k).or_default().push(item);
        }
    }
    groups
}
