// CSS-in-Rust: Catppuccin Mocha palette, labelled border containers
pub const MAIN_STYLES: &str = r#"
@import url("https://fonts.googleapis.com/css2?family=DM+Mono:ital,wght@0,300;0,400;0,500&display=swap");

body {
    font-family: "DM Mono", monospace;
    letter-spacing: -0.05ch;
    background-color: #1e1e2e;
    color: #cdd6f4;
    margin: 0;
    padding: 20px;
}

.app {
    max-width: 1100px;
    margin: 0 auto;
}

.hidden {
    display: none !important;
}

.main-grid {
    display: grid;
    grid-template-columns: 1fr;
    gap: 20px;
    margin: 20px 0;
}

.border-container {
    position: relative;
    padding: 20px;
    border: 2px solid #45475a;
    transition: border-color 0.2s ease-out;
    background-color: #1e1e2e;
}

.border-container::before {
    position: absolute;
    top: -12px;
    left: 20px;
    background-color: #1e1e2e;
    padding: 0 8px;
    font-size: 14px;
    color: #45475a;
    transition: color 0.2s ease-out;
}

.header-section {
    display: flex;
    justify-content: space-between;
    align-items: center;
}
.header-section::before {
    content: "filedock";
}
.header-section:hover {
    border-color: #cba6f7;
}
.header-section:hover::before {
    color: #cba6f7;
}

.files-section::before {
    content: "my files";
}
.files-section:hover {
    border-color: #89b4fa;
}
.files-section:hover::before {
    color: #89b4fa;
}

.upload-section::before {
    content: "upload";
}
.upload-section:hover {
    border-color: #a6e3a1;
}
.upload-section:hover::before {
    color: #a6e3a1;
}

.nav {
    display: flex;
    gap: 10px;
}

.nav-link {
    color: #bac2de;
    text-decoration: none;
    padding: 16px 16px 8px 16px;
}
.nav-link::before {
    content: "view";
    font-size: 12px;
    left: 10px;
}
.nav-link.active,
.nav-link:hover {
    border-color: #cba6f7;
    color: #cdd6f4;
}
.nav-link.active::before {
    color: #cba6f7;
}

.action-btn,
.choose-files-btn,
.upload-files-btn {
    background-color: #1e1e2e;
    border: 2px solid #45475a;
    color: #cdd6f4;
    padding: 20px 16px 8px 16px;
    cursor: pointer;
    font-family: "DM Mono", monospace;
    font-size: 14px;
    margin: 4px;
    text-decoration: none;
    display: inline-block;
}
.action-btn.border-container::before,
.choose-files-btn.border-container::before,
.upload-files-btn.border-container::before {
    content: "btn";
    left: 10px;
    font-size: 12px;
}
.action-btn:hover,
.choose-files-btn:hover,
.upload-files-btn:hover:not(:disabled) {
    border-color: #89b4fa;
}
.action-btn:hover.border-container::before {
    color: #89b4fa;
}

.delete-btn.border-container::before {
    content: "del";
}
.delete-btn:hover {
    border-color: #f38ba8;
}
.delete-btn:hover.border-container::before {
    color: #f38ba8;
}

.upload-files-btn:disabled {
    border-color: #313244;
    color: #6c7086;
    cursor: not-allowed;
}

.files-toolbar {
    display: flex;
    align-items: center;
    gap: 12px;
    margin-bottom: 15px;
}

.select-all {
    color: #bac2de;
    font-size: 14px;
    margin-right: auto;
}

.file-list {
    display: flex;
    flex-direction: column;
}

.file-row {
    display: grid;
    grid-template-columns: 32px 3fr 1fr 1fr 2fr auto;
    gap: 12px;
    align-items: center;
    padding: 10px 0;
    border-bottom: 1px solid #313244;
}
.file-row:hover {
    background-color: #181825;
}
.file-header {
    color: #6c7086;
    font-size: 12px;
    text-transform: lowercase;
}

.file-cell {
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}
.file-name {
    color: #cdd6f4;
}
.file-size,
.file-date {
    color: #a6adc8;
    font-size: 14px;
}

.file-type-badge {
    font-size: 12px;
    padding: 2px 6px;
    border: 1px solid #89b4fa;
    color: #89b4fa;
    font-weight: 500;
}

.empty-state {
    text-align: center;
    padding: 40px 20px;
    color: #bac2de;
}
.empty-icon {
    font-size: 32px;
    margin-bottom: 10px;
}

.dropzone {
    text-align: center;
    padding: 40px 20px;
    border-style: dashed;
    color: #bac2de;
}
.dropzone::before {
    content: "drop";
}
.dropzone.drag-over {
    border-color: #a6e3a1;
    background-color: #181825;
}
.dropzone.drag-over::before {
    color: #a6e3a1;
}

.selected-file {
    display: flex;
    justify-content: space-between;
    margin: 20px 0;
}
.selected-file::before {
    content: "selected";
}
.selected-size {
    color: #a6adc8;
}

.progress-section {
    padding: 10px 0;
}
.progress-bar {
    width: 100%;
    background-color: #313244;
    height: 8px;
    margin: 10px 0;
}
.progress-fill {
    height: 100%;
    background-color: #a6e3a1;
    transition: width 0.2s ease;
}
.progress-percentage {
    font-size: 12px;
    color: #a6adc8;
    text-align: right;
}

.upload-actions {
    display: flex;
    justify-content: flex-end;
    gap: 10px;
    margin-top: 15px;
}

.dialog-backdrop {
    position: fixed;
    inset: 0;
    background-color: rgba(17, 17, 27, 0.8);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 20;
}
.dialog {
    min-width: 320px;
    max-width: 480px;
}
.dialog::before {
    content: "confirm";
    color: #f38ba8;
}
.dialog {
    border-color: #f38ba8;
}
.dialog-title {
    margin: 0 0 10px 0;
    font-weight: 500;
}
.dialog-message {
    color: #bac2de;
    word-break: break-word;
}
.dialog-actions {
    display: flex;
    justify-content: flex-end;
    gap: 10px;
}

.toast-container {
    position: fixed;
    bottom: 20px;
    right: 20px;
    display: flex;
    flex-direction: column;
    gap: 10px;
    z-index: 30;
}
.toast {
    background-color: #181825;
    border: 2px solid #45475a;
    padding: 12px 16px;
    min-width: 240px;
    opacity: 1;
    transition: opacity 0.3s ease-out, transform 0.3s ease-out;
}
.toast-success {
    border-color: #a6e3a1;
    color: #a6e3a1;
}
.toast-error {
    border-color: #f38ba8;
    color: #f38ba8;
}
.toast-info {
    border-color: #89b4fa;
    color: #89b4fa;
}
.toast.removing {
    opacity: 0;
    transform: translateX(20px);
}

.loading-spinner {
    position: fixed;
    inset: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    background-color: rgba(30, 30, 46, 0.5);
    z-index: 10;
}
.spinner {
    width: 40px;
    height: 40px;
    border: 4px solid #45475a;
    border-top-color: #cba6f7;
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}
@keyframes spin {
    to {
        transform: rotate(360deg);
    }
}

@media (max-width: 768px) {
    .file-row {
        grid-template-columns: 32px 1fr auto;
    }
    .file-type,
    .file-size,
    .file-date {
        display: none;
    }
}
"#;
