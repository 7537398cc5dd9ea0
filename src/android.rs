//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JByteArray, JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::error::Result;
use crate::{import_bytes, notes_to_json, render_json_to_svg};

fn into_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(s) => match env.new_string(&s) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("stafflib call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON render request to SVG.
///
/// Called from Kotlin as:
///   external fun renderJson(request: String): String?
#[no_mangle]
pub extern "system" fn Java_com_stafflib_ScoreLib_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    request: JString,
) -> jstring {
    let json: String = match env.get_string(&request) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_json_to_svg(&json);
    into_jstring(&mut env, result)
}

/// Import MusicXML or MXL bytes into note-record JSON.
///
/// Called from Kotlin as:
///   external fun importBytes(data: ByteArray, extension: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_stafflib_ScoreLib_importBytes(
    mut env: JNIEnv,
    _class: JClass,
    data: JByteArray,
    extension: JString,
) -> jstring {
    let bytes = match env.convert_byte_array(&data) {
        Ok(b) => b,
        Err(_) => return std::ptr::null_mut(),
    };

    let ext: Option<String> = if extension.is_null() {
        None
    } else {
        env.get_string(&extension).ok().map(|s| s.into())
    };

    let result = import_bytes(&bytes, ext.as_deref()).and_then(|notes| notes_to_json(&notes));
    into_jstring(&mut env, result)
}
