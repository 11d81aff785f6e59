use crate::providers::Location;

pub fn render_index(date: &str, location: &Location) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &escape(date))
        .replace("{{CITY}}", &escape(&location.city))
        .replace("{{COUNTRY}}", &escape(&location.country))
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ramazan Companion</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&family=Amiri&display=swap');

    :root {
      --bg-1: #0f1a1c;
      --bg-2: #1d3b3a;
      --ink: #f3ead7;
      --muted: #a8a291;
      --gold: #d9b45b;
      --emerald: #3fa27a;
      --card: rgba(255, 255, 255, 0.06);
      --border: rgba(217, 180, 91, 0.2);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(160deg, var(--bg-1), #132526 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 28px 16px 110px;
    }

    .app {
      width: min(520px, 100%);
      display: grid;
      gap: 20px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: 1.8rem;
      margin: 0;
      color: var(--gold);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
      color: var(--gold);
    }

    .subtitle, .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 22px;
      backdrop-filter: blur(12px);
    }

    .countdown .label {
      color: var(--gold);
      font-size: 0.9rem;
    }

    .countdown .value {
      font-size: 2.6rem;
      font-weight: 600;
      letter-spacing: 0.04em;
    }

    .prayer {
      width: 100%;
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 14px 16px;
      margin-bottom: 10px;
      border-radius: 14px;
      border: 1px solid var(--border);
      background: rgba(255, 255, 255, 0.04);
      color: var(--ink);
      font: inherit;
      cursor: pointer;
    }

    .prayer.done {
      background: rgba(63, 162, 122, 0.25);
      border-color: var(--emerald);
    }

    .prayer .nudge {
      font-size: 0.7rem;
      color: var(--gold);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--gold);
      color: var(--bg-1);
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
      border: 1px solid var(--border);
    }

    input, select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid var(--border);
      background: rgba(0, 0, 0, 0.25);
      color: var(--ink);
    }

    .row {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
      align-items: center;
    }

    .ayahs {
      max-height: 320px;
      overflow-y: auto;
      direction: rtl;
      font-family: "Amiri", serif;
      font-size: 1.4rem;
      line-height: 2.4;
    }

    .ayah-no {
      color: var(--gold);
      font-size: 0.9rem;
      margin: 0 6px;
    }

    .tally {
      font-size: 4rem;
      font-weight: 600;
      text-align: center;
      cursor: pointer;
      user-select: none;
      padding: 20px 0;
    }

    .chips button {
      background: var(--card);
      color: var(--muted);
      border: 1px solid var(--border);
    }

    .chips button.active {
      background: var(--gold);
      color: var(--bg-1);
    }

    nav {
      position: fixed;
      bottom: 18px;
      display: flex;
      gap: 8px;
      padding: 8px;
      border-radius: 999px;
      background: rgba(15, 26, 28, 0.9);
      border: 1px solid var(--border);
    }

    nav button {
      background: transparent;
      color: var(--muted);
    }

    nav button.active {
      color: var(--gold);
    }

    .status {
      min-height: 1.2em;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #e0735f;
    }

    [hidden] {
      display: none !important;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Ramazan Companion</h1>
        <p class="subtitle">Blessed Month of Reflection</p>
      </div>
      <p class="subtitle">{{CITY}}, {{COUNTRY}}</p>
    </header>

    <section data-view="prayers">
      <div class="card countdown">
        <div class="label" id="countdown-label">Waiting for today's times</div>
        <div class="value" id="countdown-value">--:--:--</div>
      </div>
      <div class="card" style="margin-top: 20px">
        <h2>Daily Prayers</h2>
        <p class="subtitle" id="date">{{DATE}}</p>
        <div id="prayers" style="margin-top: 14px"></div>
      </div>
    </section>

    <section data-view="quran" hidden>
      <div class="card">
        <div class="row" style="justify-content: space-between">
          <h2 id="juz-title">Juz 1</h2>
          <div class="row">
            <button class="ghost" id="juz-prev" type="button">&lsaquo;</button>
            <select id="juz-select"></select>
            <button class="ghost" id="juz-next" type="button">&rsaquo;</button>
          </div>
        </div>
        <div class="ayahs" id="ayahs">Loading…</div>
      </div>
      <div class="card" style="margin-top: 20px">
        <h2>Track Your Progress</h2>
        <form class="row" id="recitation-form">
          <input id="recitation-amount" placeholder="e.g., 5 pages, 2 surahs..." />
          <button type="submit">Save</button>
        </form>
        <div id="recitations" style="margin-top: 14px"></div>
      </div>
    </section>

    <section data-view="zikr" hidden>
      <div class="card">
        <h2 id="zikr-name">Zikr</h2>
        <div class="tally" id="zikr-count">0</div>
        <p class="hint" id="zikr-target"></p>
        <div class="row" style="justify-content: center">
          <button class="ghost" id="zikr-reset" type="button">Reset</button>
          <button class="ghost" id="zikr-delete" type="button">Delete</button>
        </div>
      </div>
      <div class="card" style="margin-top: 20px">
        <div class="row chips" id="zikr-list"></div>
        <form class="row" id="zikr-form" style="margin-top: 14px">
          <input id="zikr-new" placeholder="Enter Zikr Name..." />
          <button type="submit">Add</button>
        </form>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <nav>
    <button class="active" type="button" data-tab="prayers">Prayers</button>
    <button type="button" data-tab="quran">Quran</button>
    <button type="button" data-tab="zikr">Zikr</button>
  </nav>

  <script>
    const statusEl = document.getElementById('status');
    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const response = await fetch(path, options);
      if (!response.ok) {
        throw new Error(await response.text() || response.statusText);
      }
      return response.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: body === undefined ? undefined : JSON.stringify(body),
    });

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    // Prayers

    const renderPrayers = (record) => {
      document.getElementById('date').textContent = record.date;
      const list = document.getElementById('prayers');
      list.innerHTML = '';
      record.prayers.forEach((prayer) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'prayer' + (prayer.completed ? ' done' : '');
        button.appendChild(el('span', '', `${prayer.completed ? '✔' : '○'} ${prayer.name}`));
        const when = el('span', '', `${prayer.time} `);
        if (prayer.follow_up_sent && !prayer.completed) {
          when.appendChild(el('span', 'nudge', 'Follow-up'));
        }
        button.appendChild(when);
        button.addEventListener('click', async () => {
          try {
            renderPrayers(await post(`/api/prayers/${prayer.name}/toggle`));
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        list.appendChild(button);
      });
    };

    const loadPrayers = async () => {
      try {
        renderPrayers(await api('/api/prayers'));
        setStatus('');
      } catch (err) {
        setStatus('Calculating prayer times…', 'error');
      }
    };

    const tickCountdown = async () => {
      try {
        const countdown = await api('/api/countdown');
        document.getElementById('countdown-label').textContent = countdown.label;
        document.getElementById('countdown-value').textContent = countdown.remaining;
      } catch (err) {
        document.getElementById('countdown-value').textContent = '--:--:--';
      }
    };

    // Quran

    let juz = 1;
    const juzSelect = document.getElementById('juz-select');
    for (let i = 1; i <= 30; i += 1) {
      const option = document.createElement('option');
      option.value = i;
      option.textContent = i;
      juzSelect.appendChild(option);
    }

    const loadJuz = async (next) => {
      juz = Math.min(30, Math.max(1, next));
      juzSelect.value = juz;
      document.getElementById('juz-title').textContent = `Juz ${juz}`;
      const ayahsEl = document.getElementById('ayahs');
      ayahsEl.textContent = 'Loading…';
      try {
        const content = await api(`/api/quran/${juz}`);
        ayahsEl.textContent = '';
        content.ayahs.forEach((ayah) => {
          ayahsEl.appendChild(el('span', '', ayah.text));
          ayahsEl.appendChild(el('span', 'ayah-no', String(ayah.number_in_surah)));
          ayahsEl.appendChild(document.createTextNode(' '));
        });
      } catch (err) {
        ayahsEl.textContent = 'Could not load this juz.';
      }
    };

    const renderRecitations = (records) => {
      const list = document.getElementById('recitations');
      list.textContent = '';
      records.slice(0, 3).forEach((r) => {
        list.appendChild(el('p', 'hint', `${r.date} · Juz ${r.section_index} · ${r.amount}`));
      });
    };

    juzSelect.addEventListener('change', () => loadJuz(Number(juzSelect.value)));
    document.getElementById('juz-prev').addEventListener('click', () => loadJuz(juz - 1));
    document.getElementById('juz-next').addEventListener('click', () => loadJuz(juz + 1));
    document.getElementById('recitation-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const input = document.getElementById('recitation-amount');
      try {
        renderRecitations(await post('/api/recitations', { section_index: juz, amount: input.value }));
        input.value = '';
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    // Zikr

    let counters = [];
    let activeIndex = 0;

    const renderCounters = () => {
      if (activeIndex >= counters.length) {
        activeIndex = 0;
      }
      const current = counters[activeIndex];
      document.getElementById('zikr-name').textContent = current ? current.name : 'Zikr';
      document.getElementById('zikr-count').textContent = current ? current.count : 0;
      document.getElementById('zikr-target').textContent =
        current && current.target ? `Target ${current.target}` : '';
      const list = document.getElementById('zikr-list');
      list.innerHTML = '';
      counters.forEach((counter, idx) => {
        const chip = document.createElement('button');
        chip.type = 'button';
        chip.textContent = counter.name;
        chip.className = idx === activeIndex ? 'active' : '';
        chip.addEventListener('click', () => {
          activeIndex = idx;
          renderCounters();
        });
        list.appendChild(chip);
      });
    };

    const replaceCounter = (updated) => {
      counters = counters.map((c) => (c.id === updated.id ? updated : c));
      renderCounters();
    };

    document.getElementById('zikr-count').addEventListener('click', async () => {
      const current = counters[activeIndex];
      if (!current) return;
      replaceCounter(await post(`/api/counters/${current.id}/increment`));
      if ('vibrate' in navigator) navigator.vibrate(50);
    });
    document.getElementById('zikr-reset').addEventListener('click', async () => {
      const current = counters[activeIndex];
      if (current) replaceCounter(await post(`/api/counters/${current.id}/reset`));
    });
    document.getElementById('zikr-delete').addEventListener('click', async () => {
      const current = counters[activeIndex];
      if (!current) return;
      counters = await api(`/api/counters/${current.id}`, { method: 'DELETE' });
      activeIndex = 0;
      renderCounters();
    });
    document.getElementById('zikr-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const input = document.getElementById('zikr-new');
      const before = counters.length;
      counters = await post('/api/counters', { name: input.value });
      if (counters.length > before) activeIndex = counters.length - 1;
      input.value = '';
      renderCounters();
    });

    // Tabs

    document.querySelectorAll('nav button').forEach((tab) => {
      tab.addEventListener('click', () => {
        document.querySelectorAll('nav button').forEach((t) => t.classList.toggle('active', t === tab));
        document.querySelectorAll('[data-view]').forEach((view) => {
          view.hidden = view.dataset.view !== tab.dataset.tab;
        });
      });
    });

    loadPrayers();
    tickCountdown();
    loadJuz(1);
    api('/api/recitations').then(renderRecitations).catch(() => {});
    api('/api/counters').then((list) => { counters = list; renderCounters(); }).catch(() => {});
    setInterval(tickCountdown, 1000);
    setInterval(loadPrayers, 60000);
  </script>
</body>
</html>
"#;
