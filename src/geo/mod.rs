pub mod addr;
pub mod registry;

use std::cmp::Ordering;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

pub use addr::{ip_to_u32, u32_to_ip};

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("invalid IPv4 address: '{0}'")]
    InvalidAddress(String),
}

/// 注册局分配给单一国家的一段连续 IPv4 区间（闭区间）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRange {
    /// 两字母国家/经济体代码
    pub country: String,
    pub start: u32,
    pub end: u32,
    /// 源文件中的起始地址原文，用于诊断
    pub original_start: String,
    /// 注册局声明的地址数量
    pub size: u32,
}

/// 查询结果：命中国家码，或地址合法但不在任何区间内
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Country(String),
    Unknown,
}

impl Lookup {
    /// HTTP 层使用的字符串形式，未命中为 "Unknown"
    pub fn as_str(&self) -> &str {
        match self {
            Lookup::Country(code) => code,
            Lookup::Unknown => "Unknown",
        }
    }
}

/// 按起始地址排序的区间索引。启动时构建一次，此后只读；
/// 更新方式只有整体重建后替换，没有单条修改
pub struct GeoDb {
    ranges: Vec<AddressRange>,
}

impl GeoDb {
    /// 从已解析的记录构建索引（一次性 O(n log n) 排序）
    pub fn from_ranges(mut ranges: Vec<AddressRange>) -> Self {
        ranges.sort_by_key(|r| r.start);
        Self { ranges }
    }

    /// 从注册局数据文件加载。文件缺失不致命：返回空索引，
    /// 之后所有查询降级为 Unknown
    pub fn load(path: &str) -> Self {
        let raw = match std::fs::read_to_string(Path::new(path)) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = path, error = %e, "registry file unavailable, serving empty database");
                return Self::from_ranges(Vec::new());
            }
        };
        let parsed = registry::parse(&raw);
        info!(
            path = path,
            ranges = parsed.ranges.len(),
            rejected = parsed.rejected,
            "registry database loaded"
        );
        Self::from_ranges(parsed.ranges)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// 二分查找包含指定地址的区间
    pub fn find(&self, addr: u32) -> Option<&AddressRange> {
        self.ranges
            .binary_search_by(|r| {
                if r.end < addr {
                    Ordering::Less
                } else if r.start > addr {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .ok()
            .map(|i| &self.ranges[i])
    }

    /// 解析字符串形式的地址并查询。解析失败是错误，
    /// 与"合法但未分配"（Unknown）严格区分
    pub fn resolve(&self, address: &str) -> Result<Lookup, GeoError> {
        let addr = addr::ip_to_u32(address)?;
        Ok(match self.find(addr) {
            Some(range) => Lookup::Country(range.country.clone()),
            None => Lookup::Unknown,
        })
    }
}
