//! ブラウザのGeolocation APIによる現在地取得
//!
//! `navigator.geolocation.getCurrentPosition` を1回呼び、コールバックの
//! 結果をoneshotチャネルでFutureへ橋渡しする。

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::Reflect;
use report_map_common::{GeoLocator, LocateOptions, LocateResult, LocationUnavailable, MapPoint};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PositionOptions;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocator {
    pub options: LocateOptions,
}

impl GeoLocator for BrowserLocator {
    fn current_position(&self) -> LocalBoxFuture<'_, LocateResult> {
        request_position(self.options).boxed_local()
    }
}

type Pending = Rc<RefCell<Option<oneshot::Sender<LocateResult>>>>;

async fn request_position(options: LocateOptions) -> LocateResult {
    let geolocation = web_sys::window()
        .and_then(|window| window.navigator().geolocation().ok())
        .ok_or(LocationUnavailable::Unsupported)?;

    let (tx, rx) = oneshot::channel();
    let pending: Pending = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let pending = pending.clone();
        Closure::wrap(Box::new(move |position: JsValue| {
            let result = read_position(&position).ok_or(LocationUnavailable::PositionUnavailable);
            resolve(&pending, result);
        }) as Box<dyn FnMut(JsValue)>)
    };

    let on_error = {
        let pending = pending.clone();
        Closure::wrap(Box::new(move |error: JsValue| {
            let code = Reflect::get(&error, &JsValue::from_str("code"))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            resolve(&pending, Err(LocationUnavailable::from_code(code as u16)));
        }) as Box<dyn FnMut(JsValue)>)
    };

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &position_options(options),
        )
        .map_err(|_| LocationUnavailable::Unsupported)?;

    // コールバックはブラウザが1回だけ呼ぶ
    on_success.forget();
    on_error.forget();

    rx.await.unwrap_or(Err(LocationUnavailable::PositionUnavailable))
}

fn resolve(pending: &Pending, result: LocateResult) {
    if let Some(tx) = pending.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

fn read_position(position: &JsValue) -> Option<MapPoint> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let latitude = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let longitude = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(MapPoint::new(latitude, longitude))
}

fn position_options(options: LocateOptions) -> PositionOptions {
    let object = js_sys::Object::new();
    let _ = Reflect::set(
        &object,
        &JsValue::from_str("enableHighAccuracy"),
        &JsValue::from_bool(options.high_accuracy),
    );
    let _ = Reflect::set(
        &object,
        &JsValue::from_str("timeout"),
        &JsValue::from_f64(options.timeout_ms as f64),
    );
    let _ = Reflect::set(
        &object,
        &JsValue::from_str("maximumAge"),
        &JsValue::from_f64(options.maximum_age_ms as f64),
    );
    object.unchecked_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_read_position() {
        let coords = js_sys::Object::new();
        Reflect::set(&coords, &"latitude".into(), &JsValue::from_f64(24.7)).unwrap();
        Reflect::set(&coords, &"longitude".into(), &JsValue::from_f64(46.6)).unwrap();
        let position = js_sys::Object::new();
        Reflect::set(&position, &"coords".into(), &coords).unwrap();

        assert_eq!(read_position(&position), Some(MapPoint::new(24.7, 46.6)));
        assert_eq!(read_position(&JsValue::NULL), None);
    }
}
