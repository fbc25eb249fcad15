//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header" dir="rtl">
            <h1>"خريطة البلاغات"</h1>
            <p class="text-muted">"بلاغات المواطنين عن مشاكل الأحياء"</p>
        </header>
    }
}
