/// Anti-debugging snippet prepended to every script in the protected
/// artifact. Self-contained IIFE: a 500 ms devtools dimension poll,
/// inspector shortcut traps, and context-menu / selection / drag
/// suppression. The destructive redirect is left commented out, matching
/// the deterrence-only posture of the rest of the pipeline.
pub fn antidebug_snippet() -> &'static str {
    r#"(function() {
    var devtools = {open: false, orientation: null};
    var threshold = 160;

    setInterval(function() {
        if (window.outerHeight - window.innerHeight > threshold ||
            window.outerWidth - window.innerWidth > threshold) {
            if (!devtools.open) {
                devtools.open = true;
                console.clear();
                console.log('%c!Acceso no autorizado detectado!', 'color: red; font-size: 20px;');
                // window.location.href = 'about:blank';
            }
        } else {
            devtools.open = false;
        }
    }, 500);

    document.addEventListener('keydown', function(e) {
        if (e.key === 'F12' || (e.ctrlKey && e.shiftKey && e.key === 'I')) {
            e.preventDefault();
            console.clear();
            console.log('%c!Herramientas de desarrollador deshabilitadas!', 'color: red; font-size: 16px;');
            return false;
        }
    });

    document.addEventListener('contextmenu', function(e) {
        e.preventDefault();
        return false;
    });

    document.addEventListener('selectstart', function(e) {
        e.preventDefault();
        return false;
    });

    document.addEventListener('dragstart', function(e) {
        e.preventDefault();
        return false;
    });
})();
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_covers_every_trap() {
        let snippet = antidebug_snippet();
        assert!(snippet.contains("setInterval"));
        assert!(snippet.contains("threshold = 160"));
        assert!(snippet.contains("keydown"));
        assert!(snippet.contains("contextmenu"));
        assert!(snippet.contains("selectstart"));
        assert!(snippet.contains("dragstart"));
    }

    #[test]
    fn test_destructive_redirect_stays_commented() {
        assert!(antidebug_snippet().contains("// window.location.href"));
    }
}
