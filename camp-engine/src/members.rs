//! 会员簿
//!
//! 会员与入住房间之间只按姓名精确匹配（取第一个），不要求唯一。

use camp_client::Intelligence;
use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::models::{AiAnalysis, Member, MemberCreate, MemberTier, MemberUpdate};
use shared::util::snowflake_id;

use crate::core::{ChangeEvent, Resort};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// 新会员的默认标签
pub const NEW_MEMBER_TAG: &str = "新會員";

/// 按姓名精确查找（第一个匹配）
pub fn find_by_name<'a>(members: &'a [Member], name: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.name == name)
}

fn member_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::MemberNotFound, format!("Member not found: {id}")).with_detail("member_id", id)
}

/// 追加去重：保留原有顺序，新值接在后面
fn union(existing: &mut Vec<String>, incoming: &[String]) {
    for value in incoming {
        if !existing.contains(value) {
            existing.push(value.clone());
        }
    }
}

/// 合并 AI 分析结果：饮食限制、特殊需求、标签取并集，摘要写入偏好
pub fn merge_analysis(member: &mut Member, notes: &str, analysis: &AiAnalysis) {
    member.notes = notes.to_string();
    union(&mut member.dietary_restrictions, &analysis.dietary_restrictions);
    union(&mut member.special_requests, &analysis.special_requests);
    union(&mut member.tags, &analysis.tags);
    member.preferences = analysis.summary.clone();
}

fn validate_create(payload: &MemberCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_NAME_LEN)?;
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

/// 由表单建立会员
pub fn new_member(payload: MemberCreate, join_date: chrono::NaiveDate) -> AppResult<Member> {
    validate_create(&payload)?;
    Ok(Member {
        id: snowflake_id(),
        name: payload.name.trim().to_string(),
        location: payload.location.unwrap_or_default(),
        phone: payload.phone.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        birthday: payload.birthday,
        tier: payload.tier.unwrap_or_default(),
        join_date: join_date.format("%Y-%m-%d").to_string(),
        total_visits: 0,
        total_spend: 0.0,
        tags: vec![NEW_MEMBER_TAG.to_string()],
        dietary_restrictions: Vec::new(),
        special_requests: Vec::new(),
        preferences: String::new(),
        history: Vec::new(),
        notes: payload.notes.unwrap_or_default(),
    })
}

/// 会员列表筛选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberQuery {
    /// 姓名、电话或标签包含
    pub search: Option<String>,
    pub tier: Option<MemberTier>,
    /// 空地区按 "其他" 计
    pub location: Option<String>,
}

pub fn search_members(members: &[Member], query: &MemberQuery) -> Vec<Member> {
    let term = query.search.as_deref().map(str::trim).unwrap_or("");
    members
        .iter()
        .filter(|m| {
            term.is_empty()
                || m.name.contains(term)
                || m.phone.contains(term)
                || m.tags.iter().any(|t| t.contains(term))
        })
        .filter(|m| query.tier.is_none_or(|tier| m.tier == tier))
        .filter(|m| {
            query.location.as_deref().is_none_or(|loc| {
                let own = if m.location.is_empty() { "其他" } else { m.location.as_str() };
                own == loc
            })
        })
        .cloned()
        .collect()
}

impl Resort {
    pub fn add_member(&self, payload: MemberCreate) -> AppResult<Member> {
        let member = self.try_mutate(ChangeEvent::Members, |state, ctx| {
            let member = new_member(payload, ctx.today())?;
            state.members.insert(0, member.clone());
            Ok::<_, AppError>(member)
        })?;
        tracing::info!(member_id = member.id, name = %member.name, "Member added");
        Ok(member)
    }

    pub fn update_member(&self, id: i64, update: MemberUpdate) -> AppResult<Member> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&update.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&update.notes, "notes", MAX_NOTE_LEN)?;

        self.try_mutate(ChangeEvent::Members, |state, _| {
            let member = state.members.iter_mut().find(|m| m.id == id).ok_or_else(|| member_not_found(id))?;
            if let Some(v) = update.name {
                member.name = v.trim().to_string();
            }
            if let Some(v) = update.location {
                member.location = v;
            }
            if let Some(v) = update.phone {
                member.phone = v;
            }
            if let Some(v) = update.email {
                member.email = v;
            }
            if let Some(v) = update.birthday {
                member.birthday = Some(v);
            }
            if let Some(v) = update.tier {
                member.tier = v;
            }
            if let Some(v) = update.tags {
                member.tags = v;
            }
            if let Some(v) = update.dietary_restrictions {
                member.dietary_restrictions = v;
            }
            if let Some(v) = update.notes {
                member.notes = v;
            }
            Ok(member.clone())
        })
    }

    pub fn member(&self, id: i64) -> Option<Member> {
        self.read(|s| s.members.iter().find(|m| m.id == id).cloned())
    }

    pub fn find_member_by_name(&self, name: &str) -> Option<Member> {
        self.read(|s| find_by_name(&s.members, name).cloned())
    }

    pub fn search_members(&self, query: &MemberQuery) -> Vec<Member> {
        self.read(|s| search_members(&s.members, query))
    }

    /// AI 分析员工备注并合并进会员档案
    ///
    /// AI 调用在锁外进行；服务失败时使用分析失败的兜底结果。
    pub async fn analyze_member_notes(&self, id: i64, notes: &str, ai: &dyn Intelligence) -> AppResult<Member> {
        validate_optional_text(&Some(notes.to_string()), "notes", MAX_NOTE_LEN)?;
        if self.member(id).is_none() {
            return Err(member_not_found(id));
        }

        let analysis = ai.analyze_member_notes(notes).await;
        self.try_mutate(ChangeEvent::Members, |state, _| {
            let member = state.members.iter_mut().find(|m| m.id == id).ok_or_else(|| member_not_found(id))?;
            merge_analysis(member, notes, &analysis);
            Ok(member.clone())
        })
    }

    /// 个性化欢迎词（AI 不可用时为固定兜底文案）
    pub async fn welcome_message(&self, id: i64, ai: &dyn Intelligence) -> AppResult<String> {
        let member = self.member(id).ok_or_else(|| member_not_found(id))?;
        Ok(ai.generate_welcome_message(&member).await)
    }
}
