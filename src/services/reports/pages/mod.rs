//! One report definition per dashboard page.

mod erpl;
mod graduated;
mod home;
mod internship;
mod partner;
mod staff;
mod teacher;
mod tvet15m;
mod tvetsms;

use super::context::{PageOutput, ReportContext};
use crate::errors::Result;
use crate::models::filters::FilterSelection;
use crate::models::reports::PageKey;

/// Y axis label shared by the trainee charts
pub(super) const TRAINEES: &str = "ចំនួនសិក្ខាកាម";
pub(super) const STUDENTS: &str = "ចំនួនសិស្ស";
pub(super) const DATE_RANGE_LABEL: &str = "ជ្រើសរើសចន្លោះកាលបរិច្ឆេទ";

pub async fn build(
    ctx: &ReportContext,
    page: PageKey,
    selection: &FilterSelection,
) -> Result<PageOutput> {
    match page {
        PageKey::Home => home::build(ctx).await,
        PageKey::Tvetsms => tvetsms::build(ctx, selection).await,
        PageKey::Staff => staff::build(ctx, selection).await,
        PageKey::Teacher => teacher::build(ctx, selection).await,
        PageKey::Partner => partner::build(ctx, selection).await,
        PageKey::Tvet15m => tvet15m::build(ctx, selection).await,
        PageKey::Internship => internship::build(ctx, selection).await,
        PageKey::Graduated => graduated::build(ctx, selection).await,
        PageKey::Erpl => erpl::build(ctx).await,
    }
}
