//! In-page routines.
//!
//! Each routine re-resolves anything ambient it needs (framework global,
//! elements) at the moment it runs; the page may have navigated since the
//! previous call.

use crate::PageScript;

/// `(states: DocumentState[]) => boolean`
pub const DOCUMENT_READY: PageScript = PageScript::new(
	"document-ready",
	r#"
(states) => states.includes(document.readyState)
"#,
);

/// `() => FrameworkProbe`
pub const FRAMEWORK_PROBE: PageScript = PageScript::new(
	"framework-probe",
	r#"
() => ({ present: !!window.angular })
"#,
);

/// `(args: FrameworkSettleArgs) => Promise<FrameworkSettle>`
///
/// Resolves once the framework reports no outstanding requests, or with
/// `settled: false` when the in-page timer fires first. Whichever happens
/// first wins. The callback path clears the timer, and so does a failed
/// injector lookup before the promise rejects.
pub const FRAMEWORK_SETTLE: PageScript = PageScript::new(
	"framework-settle",
	r#"
(args) => new Promise((resolve) => {
  const framework = window.angular || null;
  if (!framework) {
    resolve({ present: false, settled: true });
    return;
  }
  let timer = setTimeout(() => {
    timer = null;
    resolve({ present: true, settled: false });
  }, args.budgetMs);
  const finish = () => {
    if (timer !== null) {
      clearTimeout(timer);
      timer = null;
    }
    resolve({ present: true, settled: true });
  };
  let injector = null;
  try {
    let root = null;
    for (const marker of args.markers) {
      root = document.querySelector(marker);
      if (root) {
        break;
      }
    }
    injector = framework.element(root || document).injector();
  } catch (ex) {
    injector = null;
  }
  try {
    injector = injector || framework.injector(['ng']);
    const get = typeof injector.get === 'function' ? (name) => injector.get(name) : injector;
    get('$browser').notifyWhenNoOutstandingRequests(finish);
  } catch (ex) {
    if (timer !== null) {
      clearTimeout(timer);
      timer = null;
    }
    throw ex;
  }
})
"#,
);

/// `(selector: string) => boolean`
pub const ELEMENT_EXISTS: PageScript = PageScript::new(
	"element-exists",
	r#"
(selector) => document.querySelector(selector) !== null
"#,
);

/// `(selector: string) => boolean`
pub const CLICK: PageScript = PageScript::new(
	"click",
	r#"
(selector) => {
  const el = document.querySelector(selector);
  if (!el) {
    return false;
  }
  el.click();
  return true;
}
"#,
);

/// `(selector: string, value: string) => TypeOutcome`
pub const TYPE_TEXT: PageScript = PageScript::new(
	"type-text",
	r#"
(selector, value) => {
  const el = document.querySelector(selector);
  if (!el) {
    return { applied: false, masked: false };
  }
  if (typeof el.focus === 'function') {
    el.focus();
  }
  el.value = value;
  for (const type of ['input', 'change', 'focusout']) {
    el.dispatchEvent(new Event(type, { bubbles: true }));
  }
  return { applied: true, masked: el.type === 'password' };
}
"#,
);

/// `(selector: string, checked: boolean) => boolean`
pub const TOGGLE_CHECKBOX: PageScript = PageScript::new(
	"toggle-checkbox",
	r#"
(selector, checked) => {
  const el = document.querySelector(selector);
  if (!el) {
    return false;
  }
  el.checked = checked;
  for (const type of ['change', 'focusout']) {
    el.dispatchEvent(new Event(type, { bubbles: true }));
  }
  return true;
}
"#,
);

/// `(selector: string, texts: string[], selected: boolean) => boolean`
pub const TOGGLE_SELECT: PageScript = PageScript::new(
	"toggle-select",
	r#"
(selector, texts, selected) => {
  const el = document.querySelector(selector);
  if (!el) {
    return false;
  }
  for (const option of Array.from(el.options || [])) {
    if (texts.includes(option.text)) {
      option.selected = selected;
    }
  }
  for (const type of ['change', 'focusout']) {
    el.dispatchEvent(new Event(type, { bubbles: true }));
  }
  return true;
}
"#,
);
